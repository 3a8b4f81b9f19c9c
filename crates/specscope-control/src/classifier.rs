//! Client side of the external prediction service.
//!
//! [`Classifier`] is the seam between the HTTP layer and the model. The
//! production implementation, [`HttpClassifier`], POSTs one feature tuple per
//! reading to the service; tests plug in an in-process stub.
//!
//! [`classify_all`] fans a batch out with bounded concurrency. Every call is
//! independent and bounded by a timeout, so a failing or hanging request only
//! loses its own reading. Nothing is retried.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};

use specscope_common::models::Reading;
use specscope_common::protocol::{PredictRequest, PredictResponse};

use crate::state::Settings;

/// Why a single prediction produced no verdict.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("prediction request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("prediction service answered HTTP {0}")]
    Status(u16),
    #[error("prediction timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed prediction: confidence {0} outside [0, 1]")]
    Malformed(f64),
}

/// Anything that can turn a feature tuple into a verdict.
pub trait Classifier: Send + Sync {
    fn classify(
        &self,
        request: PredictRequest,
    ) -> BoxFuture<'_, Result<PredictResponse, ClassifyError>>;
}

// ── HTTP client ─────────────────────────────────────────────────────

/// Classifier backed by the prediction service's `POST /predict` route.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    url: String,
}

impl HttpClassifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Classifier for HttpClassifier {
    fn classify(
        &self,
        request: PredictRequest,
    ) -> BoxFuture<'_, Result<PredictResponse, ClassifyError>> {
        Box::pin(async move {
            let resp = self.client.post(&self.url).json(&request).send().await?;

            let status = resp.status();
            if !status.is_success() {
                return Err(ClassifyError::Status(status.as_u16()));
            }

            let verdict: PredictResponse = resp.json().await?;
            if !verdict.is_well_formed() {
                return Err(ClassifyError::Malformed(verdict.confidence));
            }
            Ok(verdict)
        })
    }
}

// ── Batch fan-out ───────────────────────────────────────────────────

/// Result of classifying a batch of readings.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Annotated copies of the readings that got a verdict, in input order.
    pub classified: Vec<Reading>,
    /// Readings skipped because their prediction failed.
    pub skipped: usize,
}

/// Classify every reading with at most `settings.predict_concurrency`
/// requests in flight, each bounded by `settings.predict_timeout`.
pub async fn classify_all(
    classifier: &dyn Classifier,
    readings: &[Reading],
    settings: &Settings,
) -> BatchOutcome {
    let timeout = settings.predict_timeout;

    let calls: Vec<BoxFuture<'_, Option<Reading>>> = readings
        .iter()
        .map(|reading| classify_one(classifier, reading, timeout).boxed())
        .collect();

    let results: Vec<Option<Reading>> = stream::iter(calls)
        .buffered(settings.predict_concurrency.max(1))
        .collect()
        .await;

    let classified: Vec<Reading> = results.into_iter().flatten().collect();
    let skipped = readings.len() - classified.len();

    tracing::info!(
        requested = readings.len(),
        classified = classified.len(),
        skipped,
        "classification batch complete"
    );

    BatchOutcome {
        classified,
        skipped,
    }
}

/// One prediction under `timeout`. `None` when it failed; the cause is logged.
async fn classify_one(
    classifier: &dyn Classifier,
    reading: &Reading,
    timeout: Duration,
) -> Option<Reading> {
    let call = classifier.classify(PredictRequest::from(reading));
    let outcome = match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(ClassifyError::Timeout(timeout)),
    };

    match outcome {
        Ok(verdict) => Some(verdict.apply(reading)),
        Err(e) => {
            tracing::warn!(
                frequency_mhz = reading.frequency,
                error = %e,
                "prediction failed, skipping reading"
            );
            None
        }
    }
}
