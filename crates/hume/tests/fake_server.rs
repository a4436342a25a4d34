use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use parley_hume::{ErrorKind, HumeClient, HumeConfigBuilder};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const API_KEY: &str = "test-key";

#[derive(Clone, Copy)]
enum JobOutcome {
    /// Reports `IN_PROGRESS` this many times, then `COMPLETED`.
    CompletesAfter(usize),
    Fails,
    NeverCompletes,
}

#[derive(Clone)]
struct FakeHume {
    outcome: JobOutcome,
    predictions: &'static str,
    status_polls: Arc<AtomicUsize>,
    submitted: Arc<Mutex<Option<Value>>>,
}

impl FakeHume {
    fn new(outcome: JobOutcome, predictions: &'static str) -> Self {
        Self {
            outcome,
            predictions,
            status_polls: Default::default(),
            submitted: Default::default(),
        }
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("X-Hume-Api-Key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == API_KEY)
}

async fn submit_handler(
    State(state): State<FakeHume>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    *state.submitted.lock().unwrap() = Some(body);
    Json(json!({ "job_id": "job-1" })).into_response()
}

async fn status_handler(
    State(state): State<FakeHume>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let polls = state.status_polls.fetch_add(1, Ordering::SeqCst);
    let job_state = match state.outcome {
        JobOutcome::CompletesAfter(n) if polls >= n => {
            json!({ "status": "COMPLETED" })
        }
        JobOutcome::CompletesAfter(_) | JobOutcome::NeverCompletes => {
            json!({ "status": "IN_PROGRESS" })
        }
        JobOutcome::Fails => {
            json!({ "status": "FAILED", "message": "unsupported language" })
        }
    };
    Json(json!({ "job_id": job_id, "state": job_state })).into_response()
}

async fn predictions_handler(
    State(state): State<FakeHume>,
    Path(_job_id): Path<String>,
) -> Response {
    let body: Value = serde_json::from_str(state.predictions).unwrap();
    Json(body).into_response()
}

async fn serve(state: FakeHume) -> String {
    let app = Router::new()
        .route("/v0/batch/jobs", post(submit_handler))
        .route("/v0/batch/jobs/{id}", get(status_handler))
        .route("/v0/batch/jobs/{id}/predictions", get(predictions_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v0")
}

fn client(base_url: String, api_key: &str) -> HumeClient {
    let config = HumeConfigBuilder::with_api_key(api_key)
        .with_base_url(base_url)
        .with_initial_delay(Duration::from_millis(1))
        .with_poll_interval(Duration::from_millis(5))
        .with_max_wait(Duration::from_secs(5))
        .build();
    HumeClient::new(config)
}

fn texts() -> Vec<String> {
    vec!["I'm happy".to_owned(), "So sad".to_owned()]
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn test_analyze() {
    let state = FakeHume::new(
        JobOutcome::CompletesAfter(2),
        include_str!("../fixtures/predictions.json"),
    );
    let base_url = serve(state.clone()).await;
    let client = client(base_url, API_KEY);

    let results = client.analyze(&texts()).await.unwrap();
    assert_eq!(results.len(), 2);

    let happy = &results[0].emotions;
    assert_eq!(happy[0].name, "Joy");
    assert_close(happy[0].score, 0.575);
    assert_eq!(happy[1].name, "Sadness");
    assert_close(happy[1].score, 0.06875);

    let sad = &results[1].emotions;
    assert_eq!(sad[0].name, "Sadness");
    assert_close(sad[0].score, 0.66);
    assert_eq!(sad[1].name, "Joy");
    assert_close(sad[1].score, 0.04);

    assert_eq!(state.status_polls.load(Ordering::SeqCst), 3);
    assert_eq!(
        state.submitted.lock().unwrap().clone().unwrap(),
        json!({
            "text": ["I'm happy", "So sad"],
            "models": { "language": {} }
        })
    );
}

#[tokio::test]
async fn test_job_failed() {
    let state = FakeHume::new(
        JobOutcome::Fails,
        include_str!("../fixtures/predictions.json"),
    );
    let base_url = serve(state.clone()).await;
    let client = client(base_url, API_KEY);

    let err = client.try_analyze(&texts()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::JobFailed);
    assert_eq!(err.message(), "unsupported language");
    assert_eq!(state.status_polls.load(Ordering::SeqCst), 1);

    let results = client.analyze(&texts()).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.emotions.is_empty()));
}

#[tokio::test]
async fn test_max_wait() {
    let state = FakeHume::new(
        JobOutcome::NeverCompletes,
        include_str!("../fixtures/predictions.json"),
    );
    let base_url = serve(state.clone()).await;
    let config = HumeConfigBuilder::with_api_key(API_KEY)
        .with_base_url(base_url)
        .with_initial_delay(Duration::from_millis(1))
        .with_poll_interval(Duration::from_millis(5))
        .with_max_wait(Duration::from_millis(60))
        .build();
    let client = HumeClient::new(config);

    let err = client.try_analyze(&texts()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(state.status_polls.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn test_unauthorized() {
    let state = FakeHume::new(
        JobOutcome::CompletesAfter(0),
        include_str!("../fixtures/predictions.json"),
    );
    let base_url = serve(state.clone()).await;
    let client = client(base_url, "wrong-key");

    let err = client.try_analyze(&texts()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Status);

    let results = client.analyze(&texts()).await.unwrap();
    assert!(results.iter().all(|r| r.emotions.is_empty()));
    assert!(state.submitted.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_degenerate_input_is_not_swallowed() {
    let state = FakeHume::new(
        JobOutcome::CompletesAfter(0),
        include_str!("../fixtures/empty_text_predictions.json"),
    );
    let base_url = serve(state).await;
    let client = client(base_url, API_KEY);

    let err = client.analyze(&["   ".to_owned()]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DegenerateInput);
}
