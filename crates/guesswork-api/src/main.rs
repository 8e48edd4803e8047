//! Guesswork API server entry point.

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use guesswork_api::config::ApiConfig;
use guesswork_api::error::AppError;
use guesswork_api::routes;
use guesswork_api::state::AppState;
use guesswork_content::HttpContentProvider;
use guesswork_content::http_provider::DEFAULT_TIMEOUT;
use guesswork_core::ledger_store::LedgerStore;
use guesswork_engine::{EngineDeps, RecencyLedger, RoundEngine};
use guesswork_ledger_store::{JsonFileLedgerStore, PgLedgerStore};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

async fn ledger_store(config: &ApiConfig) -> Result<Arc<dyn LedgerStore>, AppError> {
    let Some(database_url) = &config.database_url else {
        let store = JsonFileLedgerStore::new(config.ledger_path.clone());
        tracing::info!(path = %store.path().display(), "persisting topic history to file");
        return Ok(Arc::new(store));
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    let store = PgLedgerStore::new(pool);
    store.ensure_schema().await?;
    tracing::info!("persisting topic history to PostgreSQL");
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Guesswork API server");

    let config = ApiConfig::from_env()?;

    let store = ledger_store(&config).await?;
    let ledger = RecencyLedger::load(store, config.engine.ledger_capacity).await;
    let provider = HttpContentProvider::new(config.content_api_url.clone(), DEFAULT_TIMEOUT)?;
    let engine = RoundEngine::new(
        EngineDeps::new(Arc::new(provider)),
        ledger,
        config.engine.clone(),
    )?;
    engine.prewarm();

    // TODO: Replace CorsLayer::permissive() with the presentation layer's origin.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/game", routes::game::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(engine));

    let addr = config.listen_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
