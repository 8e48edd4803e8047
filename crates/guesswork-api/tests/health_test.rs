//! Integration tests for the health endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use guesswork_core::ledger_store::LedgerStore;
use guesswork_test_support::{InMemoryLedgerStore, ScriptedContentProvider};

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let store: Arc<dyn LedgerStore> = Arc::new(InMemoryLedgerStore::with_labels(vec![
        "Compass".to_owned(),
        "Espresso".to_owned(),
    ]));
    let engine = common::build_engine(Arc::new(ScriptedContentProvider::default()), store).await;

    let (status, json) = common::get_json(common::build_test_app(engine), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["remembered_topics"], 2);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let engine = common::build_in_memory_engine(Arc::new(ScriptedContentProvider::default())).await;
    let app = common::build_test_app(engine);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
