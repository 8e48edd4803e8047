//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use guesswork_core::ledger_store::LEDGER_STORAGE_KEY;
use guesswork_engine::EngineConfig;

use crate::error::AppError;

/// Settings for the API server process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the content generation relay.
    pub content_api_url: String,
    /// When set, the recency ledger lives in PostgreSQL.
    pub database_url: Option<String>,
    /// JSON ledger file used when no database is configured.
    pub ledger_path: PathBuf,
    pub engine: EngineConfig,
}

impl ApiConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut engine = EngineConfig::default();
        if let Some(secs) = parse::<u32>(&lookup, "ROUND_SECONDS")? {
            engine.round_duration_secs = secs;
        }
        if let Some(lives) = parse::<u32>(&lookup, "STARTING_LIVES")? {
            engine.starting_lives = lives;
        }
        if engine.round_duration_secs == 0 || engine.starting_lives == 0 {
            return Err(AppError::Config(
                "ROUND_SECONDS and STARTING_LIVES must be positive".into(),
            ));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&lookup, "PORT")?.unwrap_or(3000),
            content_api_url: lookup("CONTENT_API_URL")
                .unwrap_or_else(|| "http://localhost:3001".to_string()),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            ledger_path: lookup("LEDGER_PATH")
                .map_or_else(|| PathBuf::from(format!("{LEDGER_STORAGE_KEY}.json")), PathBuf::from),
            engine,
        })
    }

    /// Socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if host and port do not form an address.
    pub fn listen_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
        })
        .transpose()
}
