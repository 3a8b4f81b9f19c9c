//! Synthetic spectrum sweep.
//!
//! A [`Sweep`] walks `samples` evenly spaced frequencies from `start` up to
//! (but excluding) `end`. Each sample gets its power from the band plan in
//! [`crate::band`], a jittered position inside a small fixed box and a
//! timestamp one millisecond after the previous sample.

use chrono::{DateTime, TimeDelta, Utc};
use rand::{Rng, RngExt};
use specscope_common::models::Reading;

use crate::band::Band;

/// South-west corner of the box readings are scattered over.
pub const LATITUDE_ORIGIN: f64 = 37.02;
pub const LONGITUDE_ORIGIN: f64 = -121.93;
/// Side length of the box, in degrees.
pub const POSITION_JITTER_DEG: f64 = 0.05;

/// Invalid sweep parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SweepError {
    #[error("sample count must be positive")]
    NoSamples,
    #[error("frequency bounds must be finite (start {start} MHz, end {end} MHz)")]
    NonFinite { start: f64, end: f64 },
    #[error("start frequency {start} MHz must be below end frequency {end} MHz")]
    EmptyRange { start: f64, end: f64 },
    #[error("{samples} samples over {start}–{end} MHz is finer than f64 resolution")]
    StepTooFine { samples: usize, start: f64, end: f64 },
}

/// Validated sweep parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    samples: usize,
    start_mhz: f64,
    end_mhz: f64,
}

impl Sweep {
    pub fn new(samples: usize, start_mhz: f64, end_mhz: f64) -> Result<Self, SweepError> {
        if samples == 0 {
            return Err(SweepError::NoSamples);
        }
        if !start_mhz.is_finite() || !end_mhz.is_finite() {
            return Err(SweepError::NonFinite {
                start: start_mhz,
                end: end_mhz,
            });
        }
        if start_mhz >= end_mhz {
            return Err(SweepError::EmptyRange {
                start: start_mhz,
                end: end_mhz,
            });
        }

        // Adjacent frequencies must stay distinct after rounding.
        let step = (end_mhz - start_mhz) / samples as f64;
        let magnitude = start_mhz.abs().max(end_mhz.abs());
        if step <= magnitude * f64::EPSILON * 4.0 {
            return Err(SweepError::StepTooFine {
                samples,
                start: start_mhz,
                end: end_mhz,
            });
        }

        Ok(Self {
            samples,
            start_mhz,
            end_mhz,
        })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn start_mhz(&self) -> f64 {
        self.start_mhz
    }

    pub fn end_mhz(&self) -> f64 {
        self.end_mhz
    }

    /// Spacing between adjacent samples, in MHz.
    pub fn step_mhz(&self) -> f64 {
        (self.end_mhz - self.start_mhz) / self.samples as f64
    }

    /// Frequency of sample `index`.
    pub fn frequency_at(&self, index: usize) -> f64 {
        self.start_mhz + index as f64 * self.step_mhz()
    }
}

/// Generate one reading per sample of `sweep`, in frequency order.
///
/// Sample `i` is stamped `reference + i ms`. All randomness comes from
/// `rng`, so a seeded generator reproduces the sweep exactly.
pub fn generate<R: Rng + ?Sized>(
    sweep: &Sweep,
    reference: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Reading> {
    let mut readings = Vec::with_capacity(sweep.samples);

    for i in 0..sweep.samples {
        let frequency = sweep.frequency_at(i);
        // Synthetic time driving the periodic components, not wall clock.
        let t = i as f64 / 10.0;

        let band = Band::select(frequency, rng);
        let power = band.power(t, rng);

        let latitude = LATITUDE_ORIGIN + rng.random::<f64>() * POSITION_JITTER_DEG;
        let longitude = LONGITUDE_ORIGIN + rng.random::<f64>() * POSITION_JITTER_DEG;

        let timestamp = reference + TimeDelta::milliseconds(i as i64);

        readings.push(Reading::recorded(
            timestamp, frequency, power, latitude, longitude,
        ));
    }

    tracing::debug!(
        samples = sweep.samples,
        start_mhz = sweep.start_mhz,
        end_mhz = sweep.end_mhz,
        step_mhz = sweep.step_mhz(),
        "spectrum sweep generated"
    );

    readings
}
