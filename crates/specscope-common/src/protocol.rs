//! Messages exchanged with the external prediction service.
//!
//! The service accepts one feature tuple per `POST` and answers with a binary
//! verdict plus the model's confidence for the interference class. Transport
//! and endpoint address belong to the caller.

use serde::{Deserialize, Serialize};

use crate::models::Reading;

/// Feature tuple sent to the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub frequency: f64,
    pub power: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub hour: u32,
}

impl From<&Reading> for PredictRequest {
    fn from(r: &Reading) -> Self {
        Self {
            frequency: r.frequency,
            power: r.power,
            latitude: r.latitude,
            longitude: r.longitude,
            hour: r.hour,
        }
    }
}

/// Verdict returned by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub interference: bool,
    /// Probability of the interference class, in `[0, 1]`.
    pub confidence: f64,
}

impl PredictResponse {
    /// Whether `confidence` is a probability.
    pub fn is_well_formed(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }

    /// Annotated copy of `reading` carrying this verdict.
    pub fn apply(&self, reading: &Reading) -> Reading {
        reading.with_prediction(self.interference, self.confidence)
    }
}
