//! Data models for SpecScope.
//!
//! A [`Reading`] is the unit every part of the system passes around: the
//! generator produces them, the detector selects them and the HTTP layer
//! serializes them. The derived fields (`hour`, `time_period`,
//! `wifi_proximity`) always come from `timestamp` and `frequency` through
//! [`Reading::recorded`].

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

// ── Wi-Fi band ──────────────────────────────────────────────────────

/// Lower edge of the 2.4 GHz Wi-Fi band, in MHz.
pub const WIFI_BAND_START_MHZ: f64 = 2400.0;
/// Upper edge of the 2.4 GHz Wi-Fi band, in MHz.
pub const WIFI_BAND_END_MHZ: f64 = 2485.0;

/// Whether `frequency` (MHz) lies inside the 2400–2485 MHz Wi-Fi band,
/// edges included.
pub fn in_wifi_band(frequency: f64) -> bool {
    (WIFI_BAND_START_MHZ..=WIFI_BAND_END_MHZ).contains(&frequency)
}

// ── Time period ─────────────────────────────────────────────────────

/// Coarse part of the day a reading was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimePeriod {
    /// Fixed hour → period table: 6–11 morning, 12–17 afternoon,
    /// 18–23 evening, anything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimePeriod::Morning,
            12..=17 => TimePeriod::Afternoon,
            18..=23 => TimePeriod::Evening,
            _ => TimePeriod::Night,
        }
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimePeriod::Morning => write!(f, "morning"),
            TimePeriod::Afternoon => write!(f, "afternoon"),
            TimePeriod::Evening => write!(f, "evening"),
            TimePeriod::Night => write!(f, "night"),
        }
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(TimePeriod::Morning),
            "afternoon" => Ok(TimePeriod::Afternoon),
            "evening" => Ok(TimePeriod::Evening),
            "night" => Ok(TimePeriod::Night),
            other => Err(format!("unknown time period: {other}")),
        }
    }
}

// ── Reading ─────────────────────────────────────────────────────────

/// One spectrum measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    /// Centre frequency in MHz.
    pub frequency: f64,
    /// Received power in dBm.
    pub power: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Hour of day (UTC) of `timestamp`, 0–23.
    pub hour: u32,
    pub time_period: TimePeriod,
    pub wifi_proximity: bool,
    /// Set by the external classifier or carried over from a recorded label.
    #[serde(default)]
    pub interference: bool,
    /// Classifier confidence for the interference class, 0 when unclassified.
    #[serde(default)]
    pub confidence: f64,
}

impl Reading {
    /// Build an unclassified reading, deriving the hour, time period and
    /// Wi-Fi proximity from `timestamp` and `frequency`.
    pub fn recorded(
        timestamp: DateTime<Utc>,
        frequency: f64,
        power: f64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let hour = timestamp.hour();
        Self {
            timestamp,
            frequency,
            power,
            latitude,
            longitude,
            hour,
            time_period: TimePeriod::from_hour(hour),
            wifi_proximity: in_wifi_band(frequency),
            interference: false,
            confidence: 0.0,
        }
    }

    /// Copy of this reading carrying a classifier verdict.
    pub fn with_prediction(&self, interference: bool, confidence: f64) -> Self {
        Self {
            interference,
            confidence,
            ..self.clone()
        }
    }
}

// ── Replay input ────────────────────────────────────────────────────

/// A previously captured measurement submitted for replay.
///
/// Only the raw columns and an optional interference label are accepted;
/// everything else is re-derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedReading {
    pub timestamp: DateTime<Utc>,
    pub frequency: f64,
    pub power: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Label from an earlier classification; absent means clean.
    #[serde(default)]
    pub interference: bool,
}

impl From<RecordedReading> for Reading {
    fn from(r: RecordedReading) -> Self {
        let mut reading =
            Reading::recorded(r.timestamp, r.frequency, r.power, r.latitude, r.longitude);
        reading.interference = r.interference;
        reading
    }
}

// ── Trends ──────────────────────────────────────────────────────────

/// Share of flagged readings within one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyTrend {
    pub hour: u32,
    pub total: usize,
    pub flagged: usize,
    /// `flagged / total * 100`.
    pub percentage: f64,
}
