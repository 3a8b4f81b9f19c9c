//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::classifier::Classifier;

/// Tunables shared by every request handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Maximum prediction requests in flight per batch.
    pub predict_concurrency: usize,
    /// Upper bound on a single prediction round trip.
    pub predict_timeout: Duration,
    /// Fixed seed for every request's RNG. `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            predict_concurrency: 8,
            predict_timeout: Duration::from_millis(2000),
            seed: None,
        }
    }
}

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    classifier: Arc<dyn Classifier>,
    settings: Settings,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>, settings: Settings) -> Self {
        Self {
            inner: Arc::new(Inner {
                classifier,
                settings,
            }),
        }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.inner.classifier.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// A request-local RNG. Nothing random is shared between requests.
    pub fn rng(&self) -> StdRng {
        let seed = self.inner.settings.seed.unwrap_or_else(rand::random);
        StdRng::seed_from_u64(seed)
    }
}
