//! Routes for the player-facing game operations.
//!
//! Every operation answers with the game snapshot as it stands right after
//! the call. Work started by an operation (loading a round, hints) shows up
//! in later snapshots.

use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, post},
};
use guesswork_core::model::Language;
use guesswork_engine::{GameSnapshot, GuessOutcome};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /language.
#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: Language,
}

/// Request body for POST /guess.
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    /// Identity of the chosen option.
    pub choice_id: Uuid,
}

/// Response body for POST /guess.
#[derive(Debug, Serialize)]
pub struct GuessResponse {
    /// `None` when the guess was ignored because no round was in play.
    pub outcome: Option<GuessOutcome>,
    pub game: GameSnapshot,
}

/// GET /
#[instrument(skip(state))]
async fn get_game(State(state): State<AppState>) -> Json<GameSnapshot> {
    Json(state.engine.snapshot())
}

/// POST /difficulty
#[instrument(skip(state))]
async fn go_to_difficulty_select(
    State(state): State<AppState>,
) -> Result<Json<GameSnapshot>, ApiError> {
    state.engine.go_to_difficulty_select()?;
    Ok(Json(state.engine.snapshot()))
}

/// POST /start
#[instrument(skip(state))]
async fn start_game(State(state): State<AppState>) -> Json<GameSnapshot> {
    info!("handling start_game");
    state.engine.start_game();
    Json(state.engine.snapshot())
}

/// POST /language
#[instrument(skip(state, request), fields(language = %request.language))]
async fn set_language(
    State(state): State<AppState>,
    Json(request): Json<SetLanguageRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    state.engine.set_language(request.language)?;
    Ok(Json(state.engine.snapshot()))
}

/// POST /guess
#[instrument(skip(state, request), fields(choice_id = %request.choice_id))]
async fn guess(
    State(state): State<AppState>,
    Json(request): Json<GuessRequest>,
) -> Json<GuessResponse> {
    let outcome = state.engine.handle_guess(request.choice_id);
    if outcome.is_none() {
        info!("guess ignored; no round in play");
    }
    Json(GuessResponse {
        outcome,
        game: state.engine.snapshot(),
    })
}

/// POST /next-round
#[instrument(skip(state))]
async fn next_round(State(state): State<AppState>) -> Result<Json<GameSnapshot>, ApiError> {
    state.engine.next_round()?;
    Ok(Json(state.engine.snapshot()))
}

/// POST /close-award
#[instrument(skip(state))]
async fn close_award(State(state): State<AppState>) -> Json<GameSnapshot> {
    state.engine.close_award();
    Json(state.engine.snapshot())
}

/// POST /return-to-start
#[instrument(skip(state))]
async fn return_to_start(State(state): State<AppState>) -> Json<GameSnapshot> {
    state.engine.return_to_start();
    Json(state.engine.snapshot())
}

/// Returns the router for the game operations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_game))
        .route("/difficulty", post(go_to_difficulty_select))
        .route("/start", post(start_game))
        .route("/language", post(set_language))
        .route("/guess", post(guess))
        .route("/next-round", post(next_round))
        .route("/close-award", post(close_award))
        .route("/return-to-start", post(return_to_start))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use guesswork_content::{PERSONAS, StaticContentBank};
    use guesswork_core::rng::DeterministicRng;
    use guesswork_engine::{EngineConfig, EngineDeps, RecencyLedger, RoundEngine};
    use guesswork_test_support::{
        FixedClock, InMemoryLedgerStore, MockRng, RecordingFeedback, ScriptedContentProvider,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn test_app_state() -> AppState {
        let ledger = RecencyLedger::load(Arc::new(InMemoryLedgerStore::default()), 100).await;
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        let deps = EngineDeps {
            provider: Arc::new(ScriptedContentProvider::default()),
            clock: Arc::new(FixedClock::default()),
            rng,
            feedback: Arc::new(RecordingFeedback::default()),
            bank: StaticContentBank,
            personas: PERSONAS.to_vec(),
        };
        AppState::new(RoundEngine::new(deps, ledger, EngineConfig::default()).unwrap())
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_get_game_returns_start_snapshot() {
        // Arrange
        let app = router().with_state(test_app_state().await);

        // Act
        let (status, json) = send(app, "GET", "/", None).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["phase"], "START");
        assert_eq!(json["lives"], 3);
        assert_eq!(json["is_loading"], false);
    }

    #[tokio::test]
    async fn test_difficulty_twice_returns_409() {
        let state = test_app_state().await;

        let app = || router().with_state(state.clone());

        let (first, _) = send(app(), "POST", "/difficulty", None).await;
        let (second, json) = send(app(), "POST", "/difficulty", None).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(json["error"], "invalid_operation");
    }

    #[tokio::test]
    async fn test_set_language_returns_updated_snapshot() {
        let app = router().with_state(test_app_state().await);

        let (status, json) = send(
            app,
            "POST",
            "/language",
            Some(serde_json::json!({ "language": "ar" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["language"], "ar");
    }

    #[tokio::test]
    async fn test_unknown_language_is_rejected() {
        let app = router().with_state(test_app_state().await);

        let (status, _) = send(
            app,
            "POST",
            "/language",
            Some(serde_json::json!({ "language": "fr" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_guess_without_round_is_ignored() {
        let app = router().with_state(test_app_state().await);

        let (status, json) = send(
            app,
            "POST",
            "/guess",
            Some(serde_json::json!({ "choice_id": Uuid::new_v4() })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["outcome"].is_null());
        assert_eq!(json["game"]["phase"], "START");
    }

    #[tokio::test]
    async fn test_next_round_outside_round_over_returns_409() {
        let app = router().with_state(test_app_state().await);

        let (status, _) = send(app, "POST", "/next-round", None).await;

        assert_eq!(status, StatusCode::CONFLICT);
    }
}
