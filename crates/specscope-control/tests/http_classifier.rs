//! `HttpClassifier` against a local stand-in for the prediction service.
//!
//! Each test binds an axum server on an ephemeral loopback port that speaks
//! the `POST /predict` contract, then points the real HTTP client at it.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use specscope_common::protocol::{PredictRequest, PredictResponse};
use specscope_control::classifier::{Classifier, ClassifyError, HttpClassifier};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn request(power: f64) -> PredictRequest {
    PredictRequest {
        frequency: 1850.0,
        power,
        latitude: 37.03,
        longitude: -121.91,
        hour: 14,
    }
}

fn client(addr: SocketAddr, timeout: Duration) -> HttpClassifier {
    HttpClassifier::new(format!("http://{addr}/predict"), timeout).unwrap()
}

#[tokio::test]
async fn round_trip_through_predict_route() {
    let app = Router::new().route(
        "/predict",
        post(|Json(req): Json<PredictRequest>| async move {
            Json(PredictResponse {
                interference: req.power > 30.0,
                confidence: if req.power > 30.0 { 0.93 } else { 0.12 },
            })
        }),
    );
    let addr = serve(app).await;
    let classifier = client(addr, Duration::from_secs(2));

    let hot = classifier.classify(request(42.0)).await.unwrap();
    assert!(hot.interference);
    assert_eq!(hot.confidence, 0.93);

    let quiet = classifier.classify(request(-70.0)).await.unwrap();
    assert!(!quiet.interference);
    assert_eq!(quiet.confidence, 0.12);
}

#[tokio::test]
async fn error_status_is_reported() {
    let app = Router::new().route(
        "/predict",
        post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "bad features") }),
    );
    let addr = serve(app).await;

    let err = client(addr, Duration::from_secs(2))
        .classify(request(10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ClassifyError::Status(422)), "{err}");
}

#[tokio::test]
async fn undecodable_body_is_an_error() {
    let app = Router::new().route("/predict", post(|| async { "not json" }));
    let addr = serve(app).await;

    let err = client(addr, Duration::from_secs(2))
        .classify(request(10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ClassifyError::Request(_)), "{err}");
}

#[tokio::test]
async fn out_of_range_confidence_is_malformed() {
    let app = Router::new().route(
        "/predict",
        post(|| async {
            Json(serde_json::json!({ "interference": true, "confidence": 4.2 }))
        }),
    );
    let addr = serve(app).await;

    let err = client(addr, Duration::from_secs(2))
        .classify(request(10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ClassifyError::Malformed(c) if c == 4.2), "{err}");
}

#[tokio::test]
async fn slow_service_hits_client_timeout() {
    let app = Router::new().route(
        "/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(PredictResponse {
                interference: false,
                confidence: 0.0,
            })
        }),
    );
    let addr = serve(app).await;

    let err = client(addr, Duration::from_millis(100))
        .classify(request(10.0))
        .await
        .unwrap_err();
    match err {
        ClassifyError::Request(e) => assert!(e.is_timeout(), "{e}"),
        other => panic!("expected timeout, got {other}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_an_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, Duration::from_secs(2))
        .classify(request(10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ClassifyError::Request(_)), "{err}");
}
