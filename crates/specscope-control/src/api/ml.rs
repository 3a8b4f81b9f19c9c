//! Endpoints backed by the external prediction service.
//!
//! GET  /ml-interference         — classify a fresh sweep
//! POST /ml-interference/replay  — classify previously recorded readings
//!
//! Replayed rows that do not parse are dropped before classification.
//! Readings whose prediction fails are left out of the response. A batch in
//! which every prediction failed is reported as a gateway error.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use specscope_common::models::Reading;
use specscope_sim::spectrum::generate;

use crate::api::error::ApiError;
use crate::api::recorded::recorded_readings;
use crate::api::spectrum::sweep_from_query;
use crate::classifier::{BatchOutcome, classify_all};
use crate::state::AppState;

/// Smaller default batch: every reading costs a network round trip.
pub const DEFAULT_ML_SAMPLES: usize = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ml-interference", get(classify_sweep))
        .route("/ml-interference/replay", post(replay))
}

fn into_response(requested: usize, outcome: BatchOutcome) -> Result<Json<Vec<Reading>>, ApiError> {
    if requested > 0 && outcome.classified.is_empty() {
        return Err(ApiError::bad_gateway(format!(
            "prediction service produced no verdicts for {requested} readings"
        )));
    }
    Ok(Json(outcome.classified))
}

// ── Live Sweep ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MlQuery {
    pub samples: Option<usize>,
    pub start: Option<f64>,
    pub end: Option<f64>,
}

async fn classify_sweep(
    State(state): State<AppState>,
    query: Result<Query<MlQuery>, QueryRejection>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let Query(q) = query?;
    let sweep = sweep_from_query(q.samples, q.start, q.end, DEFAULT_ML_SAMPLES)?;
    let readings = generate(&sweep, Utc::now(), &mut state.rng());

    let outcome = classify_all(state.classifier(), &readings, state.settings()).await;
    into_response(readings.len(), outcome)
}

// ── Replay ──────────────────────────────────────────────────────────

async fn replay(
    State(state): State<AppState>,
    body: Result<Json<Vec<Value>>, JsonRejection>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let Json(rows) = body?;
    let readings = recorded_readings(rows)?;
    tracing::info!(readings = readings.len(), "replaying recorded readings");

    let outcome = classify_all(state.classifier(), &readings, state.settings()).await;
    into_response(readings.len(), outcome)
}
