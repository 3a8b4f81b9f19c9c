//! HTTP route tree.

pub mod error;
pub mod ml;
mod recorded;
pub mod spectrum;

use axum::Router;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

/// Build the service router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .merge(spectrum::router())
        .merge(ml::router())
}

async fn banner() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "SpecScope backend is running!\nTry visiting /data, /interference, /trends or /ml-interference (POST recorded readings to /trends or /ml-interference/replay)",
    )
}
