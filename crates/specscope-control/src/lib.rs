//! SpecScope service library.
//!
//! Re-exports the API router, shared state, configuration and the
//! prediction-service client so they can be used by integration tests.

pub mod api;
pub mod classifier;
pub mod config;
pub mod state;
