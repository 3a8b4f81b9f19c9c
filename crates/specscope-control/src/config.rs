//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::state::Settings;

/// SpecScope spectrum service.
#[derive(Parser, Debug, Clone)]
#[command(name = "specscope-control", about = "SpecScope spectrum service")]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8081")]
    pub listen_addr: SocketAddr,

    /// Prediction service endpoint.
    #[arg(long, env = "PREDICT_URL", default_value = "http://localhost:8000/predict")]
    pub predict_url: String,

    /// Timeout for one prediction request, in milliseconds.
    #[arg(long, env = "PREDICT_TIMEOUT_MS", default_value_t = 2000)]
    pub predict_timeout_ms: u64,

    /// Maximum prediction requests in flight per batch.
    #[arg(
        long,
        env = "PREDICT_CONCURRENCY",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub predict_concurrency: u32,

    /// Seed every request's RNG with this value (reproducible sweeps).
    #[arg(long, env = "SPECSCOPE_SEED")]
    pub seed: Option<u64>,
}

impl Config {
    pub fn predict_timeout(&self) -> Duration {
        Duration::from_millis(self.predict_timeout_ms)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            predict_concurrency: self.predict_concurrency as usize,
            predict_timeout: self.predict_timeout(),
            seed: self.seed,
        }
    }
}
