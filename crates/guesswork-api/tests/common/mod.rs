//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use guesswork_content::{PERSONAS, StaticContentBank};
use guesswork_core::ledger_store::LedgerStore;
use guesswork_core::provider::ContentProvider;
use guesswork_core::rng::DeterministicRng;
use guesswork_engine::{EngineConfig, EngineDeps, RecencyLedger, RoundEngine};
use guesswork_test_support::{FixedClock, InMemoryLedgerStore, MockRng, RecordingFeedback};
use http_body_util::BodyExt;
use tower::ServiceExt;

use guesswork_api::routes;
use guesswork_api::state::AppState;

/// Build an engine with deterministic clock, RNG and feedback.
pub async fn build_engine(
    provider: Arc<dyn ContentProvider>,
    store: Arc<dyn LedgerStore>,
) -> RoundEngine {
    let ledger = RecencyLedger::load(store, 100).await;
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    let deps = EngineDeps {
        provider,
        clock: Arc::new(FixedClock::default()),
        rng,
        feedback: Arc::new(RecordingFeedback::default()),
        bank: StaticContentBank,
        personas: PERSONAS.to_vec(),
    };
    RoundEngine::new(deps, ledger, EngineConfig::default()).unwrap()
}

/// Build the full app router around `engine`. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(engine: RoundEngine) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/game", routes::game::router())
        .with_state(AppState::new(engine))
}

/// Build an engine over `provider` with an in-memory ledger.
pub async fn build_in_memory_engine(provider: Arc<dyn ContentProvider>) -> RoundEngine {
    build_engine(provider, Arc::new(InMemoryLedgerStore::default())).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
