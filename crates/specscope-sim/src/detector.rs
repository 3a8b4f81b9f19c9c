//! Rule-based interference detector.
//!
//! Walks adjacent pairs `(a, b)` of a frequency-ordered sweep and selects
//! `a` when either
//!
//! 1. `a.power` exceeds the power threshold (a spike), or
//! 2. `a` and `b` are closer than the proximity window in frequency while
//!    their powers differ by more than [`POWER_JUMP_DB`] (overlapping
//!    signals).
//!
//! Rule 1 short-circuits rule 2. The final reading is never the left side
//! of a pair, so it is never evaluated on its own.

use specscope_common::models::Reading;

/// Power threshold used when the caller supplies none, in dBm.
pub const DEFAULT_POWER_THRESHOLD_DBM: f64 = 30.0;
/// Proximity window used when the caller supplies none, in MHz.
pub const DEFAULT_PROXIMITY_MHZ: f64 = 1.0;
/// Power difference between close neighbours that counts as overlap, in dB.
pub const POWER_JUMP_DB: f64 = 10.0;

/// Invalid detector parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectError {
    #[error("power threshold must be finite, got {0}")]
    NonFiniteThreshold(f64),
    #[error("proximity must be a finite, non-negative width in MHz, got {0}")]
    InvalidProximity(f64),
}

/// Detector parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub power_dbm: f64,
    pub proximity_mhz: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            power_dbm: DEFAULT_POWER_THRESHOLD_DBM,
            proximity_mhz: DEFAULT_PROXIMITY_MHZ,
        }
    }
}

impl Thresholds {
    pub fn new(power_dbm: f64, proximity_mhz: f64) -> Result<Self, DetectError> {
        if !power_dbm.is_finite() {
            return Err(DetectError::NonFiniteThreshold(power_dbm));
        }
        if !proximity_mhz.is_finite() || proximity_mhz < 0.0 {
            return Err(DetectError::InvalidProximity(proximity_mhz));
        }
        Ok(Self {
            power_dbm,
            proximity_mhz,
        })
    }

    pub fn detect(&self, readings: &[Reading]) -> Vec<Reading> {
        detect(readings, self.power_dbm, self.proximity_mhz)
    }
}

/// Select the readings flagged as likely interference, in input order.
///
/// Returned readings are unmodified copies; the `interference` field is left
/// for the external classifier.
pub fn detect(readings: &[Reading], power_threshold: f64, proximity_mhz: f64) -> Vec<Reading> {
    readings
        .windows(2)
        .filter(|pair| is_flagged(&pair[0], &pair[1], power_threshold, proximity_mhz))
        .map(|pair| pair[0].clone())
        .collect()
}

fn is_flagged(a: &Reading, b: &Reading, power_threshold: f64, proximity_mhz: f64) -> bool {
    if a.power > power_threshold {
        return true;
    }
    (a.frequency - b.frequency).abs() < proximity_mhz
        && (a.power - b.power).abs() > POWER_JUMP_DB
}
