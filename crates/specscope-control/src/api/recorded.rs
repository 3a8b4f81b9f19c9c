//! Decoding of recorded readings posted by clients.
//!
//! Rows are decoded one at a time. A row that does not parse (a missing
//! column, an unreadable timestamp) is dropped with a warning and the rest of
//! the batch goes on.

use serde_json::Value;

use specscope_common::models::{Reading, RecordedReading};

use crate::api::error::ApiError;
use crate::api::spectrum::MAX_SAMPLES;

/// Turn posted rows into readings with derived fields rebuilt.
///
/// Fails only when the batch is empty, too large, or has no usable row.
pub(crate) fn recorded_readings(rows: Vec<Value>) -> Result<Vec<Reading>, ApiError> {
    if rows.is_empty() {
        return Err(ApiError::bad_request("no recorded readings supplied"));
    }
    if rows.len() > MAX_SAMPLES {
        return Err(ApiError::bad_request(format!(
            "at most {MAX_SAMPLES} recorded readings per request, got {}",
            rows.len()
        )));
    }

    let submitted = rows.len();
    let readings: Vec<Reading> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| match serde_json::from_value::<RecordedReading>(value) {
            Ok(recorded) => Some(Reading::from(recorded)),
            Err(e) => {
                tracing::warn!(row, error = %e, "dropping unparseable recorded reading");
                None
            }
        })
        .collect();

    if readings.is_empty() {
        return Err(ApiError::bad_request(format!(
            "none of the {submitted} recorded readings could be parsed"
        )));
    }
    if readings.len() < submitted {
        tracing::info!(
            submitted,
            kept = readings.len(),
            "recorded batch had unparseable rows"
        );
    }
    Ok(readings)
}
