//! Synthetic sweep endpoints.
//!
//! GET /data          — generated readings, optionally narrowed to a band
//! GET /interference  — readings selected by the rule-based detector
//! GET /trends        — detector hit rate per hour of day
//! POST /trends       — interference rate per hour of day over recorded readings

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use specscope_common::models::{HourlyTrend, Reading};
use specscope_sim::analysis::{filter_band, hourly_trends};
use specscope_sim::detector::{DEFAULT_POWER_THRESHOLD_DBM, DEFAULT_PROXIMITY_MHZ, Thresholds};
use specscope_sim::spectrum::{Sweep, generate};

use crate::api::error::ApiError;
use crate::api::recorded::recorded_readings;
use crate::state::AppState;

/// Sweep size used when the caller gives none.
pub const DEFAULT_SAMPLES: usize = 500;
pub const DEFAULT_START_MHZ: f64 = 300.0;
pub const DEFAULT_END_MHZ: f64 = 2800.0;
/// Largest sweep a single request may ask for.
pub const MAX_SAMPLES: usize = 100_000;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data", get(data))
        .route("/interference", get(interference))
        .route("/trends", get(trends).post(recorded_trends))
}

/// Validate sweep query parameters, filling in defaults.
pub(crate) fn sweep_from_query(
    samples: Option<usize>,
    start: Option<f64>,
    end: Option<f64>,
    default_samples: usize,
) -> Result<Sweep, ApiError> {
    let samples = samples.unwrap_or(default_samples);
    if samples > MAX_SAMPLES {
        return Err(ApiError::bad_request(format!(
            "at most {MAX_SAMPLES} samples per request, got {samples}"
        )));
    }
    let sweep = Sweep::new(
        samples,
        start.unwrap_or(DEFAULT_START_MHZ),
        end.unwrap_or(DEFAULT_END_MHZ),
    )?;
    Ok(sweep)
}

// ── Raw Data ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DataQuery {
    pub samples: Option<usize>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub band_start: Option<f64>,
    pub band_end: Option<f64>,
}

async fn data(
    State(state): State<AppState>,
    query: Result<Query<DataQuery>, QueryRejection>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let Query(q) = query?;
    let sweep = sweep_from_query(q.samples, q.start, q.end, DEFAULT_SAMPLES)?;
    let readings = generate(&sweep, Utc::now(), &mut state.rng());

    let readings = match (q.band_start, q.band_end) {
        (None, None) => readings,
        (band_start, band_end) => {
            let lo = band_start.unwrap_or(f64::NEG_INFINITY);
            let hi = band_end.unwrap_or(f64::INFINITY);
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(ApiError::bad_request(format!(
                    "band_start {lo} MHz must not exceed band_end {hi} MHz"
                )));
            }
            filter_band(&readings, lo, hi)
        }
    };

    Ok(Json(readings))
}

// ── Rule-based Detection ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DetectQuery {
    pub samples: Option<usize>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub threshold: Option<f64>,
    pub proximity: Option<f64>,
}

impl DetectQuery {
    fn thresholds(&self) -> Result<Thresholds, ApiError> {
        let thresholds = Thresholds::new(
            self.threshold.unwrap_or(DEFAULT_POWER_THRESHOLD_DBM),
            self.proximity.unwrap_or(DEFAULT_PROXIMITY_MHZ),
        )?;
        Ok(thresholds)
    }
}

async fn interference(
    State(state): State<AppState>,
    query: Result<Query<DetectQuery>, QueryRejection>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let Query(q) = query?;
    let thresholds = q.thresholds()?;
    let sweep = sweep_from_query(q.samples, q.start, q.end, DEFAULT_SAMPLES)?;

    let readings = generate(&sweep, Utc::now(), &mut state.rng());
    let flagged = thresholds.detect(&readings);

    tracing::debug!(
        samples = readings.len(),
        flagged = flagged.len(),
        "rule-based detection"
    );

    Ok(Json(flagged))
}

// ── Trends ──────────────────────────────────────────────────────────

async fn trends(
    State(state): State<AppState>,
    query: Result<Query<DetectQuery>, QueryRejection>,
) -> Result<Json<Vec<HourlyTrend>>, ApiError> {
    let Query(q) = query?;
    let thresholds = q.thresholds()?;
    let sweep = sweep_from_query(q.samples, q.start, q.end, DEFAULT_SAMPLES)?;

    let readings = generate(&sweep, Utc::now(), &mut state.rng());
    let flagged = thresholds.detect(&readings);

    Ok(Json(hourly_trends(&readings, &flagged)))
}

/// Trends over readings the caller recorded. A row counts as flagged when it
/// carries `"interference": true`; rows without the field count as clean.
async fn recorded_trends(
    body: Result<Json<Vec<Value>>, JsonRejection>,
) -> Result<Json<Vec<HourlyTrend>>, ApiError> {
    let Json(rows) = body?;
    let readings = recorded_readings(rows)?;
    let flagged: Vec<Reading> = readings.iter().filter(|r| r.interference).cloned().collect();

    Ok(Json(hourly_trends(&readings, &flagged)))
}
