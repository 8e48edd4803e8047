//! HTTP relay to the text-generation service.
//!
//! The service exposes two JSON endpoints, `POST /generate-topic` and
//! `POST /generate-banter`. This client performs exactly one attempt per
//! call and reports every failure as a [`ProviderError`].

use std::time::Duration;

use async_trait::async_trait;
use guesswork_core::error::{GameError, ProviderError};
use guesswork_core::model::{Difficulty, Language, PersonaStyle};
use guesswork_core::provider::{ContentProvider, GeneratedTopic, HintRequest, TopicRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicBody<'a> {
    difficulty: Difficulty,
    recent_topics: &'a [String],
    language: Language,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BanterBody<'a> {
    topic: &'a str,
    bot_name: &'a str,
    bot_style: PersonaStyle,
    context: &'a [String],
    difficulty: Difficulty,
    language: Language,
}

#[derive(Debug, Deserialize)]
struct TopicResponse {
    label: Option<String>,
    #[serde(default)]
    distractors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BanterResponse {
    text: Option<String>,
}

/// Content provider backed by the generation service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpContentProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentProvider {
    /// Creates a provider for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GameError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GameError::Configuration(format!("http client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { client, base_url })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ContentProvider for HttpContentProvider {
    async fn generate_topic(
        &self,
        request: &TopicRequest,
    ) -> Result<GeneratedTopic, ProviderError> {
        let body = TopicBody {
            difficulty: request.difficulty,
            recent_topics: &request.recent_labels,
            language: request.language,
        };
        let response: TopicResponse = self.post("/generate-topic", &body).await?;

        let label = response
            .label
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty())
            .ok_or_else(|| ProviderError::Malformed("topic response has no label".into()))?;

        debug!(%label, distractors = response.distractors.len(), "topic generated");
        Ok(GeneratedTopic {
            label,
            distractors: response.distractors,
        })
    }

    async fn generate_hint(&self, request: &HintRequest) -> Result<String, ProviderError> {
        let body = BanterBody {
            topic: &request.topic_label,
            bot_name: &request.persona_name,
            bot_style: request.persona_style,
            context: &request.recent_context,
            difficulty: request.difficulty,
            language: request.language,
        };
        let response: BanterResponse = self.post("/generate-banter", &body).await?;

        response
            .text
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::Malformed("banter response has no text".into()))
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn provider_for(addr: SocketAddr) -> HttpContentProvider {
        HttpContentProvider::new(format!("http://{addr}/"), Duration::from_secs(2)).unwrap()
    }

    fn hint_request() -> HintRequest {
        HintRequest {
            topic_label: "Compass".into(),
            persona_name: "DJ_BIT".into(),
            persona_style: PersonaStyle::Casual,
            recent_context: vec!["DJ_GLITCH: Points somewhere.".into()],
            difficulty: Difficulty::Hard,
            language: Language::En,
        }
    }

    #[tokio::test]
    async fn test_generate_topic_sends_camel_case_body_and_parses_response() {
        // Arrange
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&seen);
        let app = Router::new().route(
            "/generate-topic",
            post(move |Json(body): Json<Value>| {
                let captured = Arc::clone(&captured);
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(json!({ "label": " Kite ", "distractors": ["Drone", "Balloon", "Glider"] }))
                }
            }),
        );
        let provider = provider_for(serve(app).await);
        let request = TopicRequest {
            difficulty: Difficulty::Medium,
            recent_labels: vec!["Espresso".into()],
            language: Language::Ar,
        };

        // Act
        let topic = provider.generate_topic(&request).await.unwrap();

        // Assert
        assert_eq!(topic.label, "Kite");
        assert_eq!(topic.distractors, vec!["Drone", "Balloon", "Glider"]);
        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["difficulty"], "medium");
        assert_eq!(body["language"], "ar");
        assert_eq!(body["recentTopics"], json!(["Espresso"]));
    }

    #[tokio::test]
    async fn test_generate_topic_maps_server_error_to_status() {
        // Arrange
        let app = Router::new().route(
            "/generate-topic",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let provider = provider_for(serve(app).await);
        let request = TopicRequest {
            difficulty: Difficulty::Easy,
            recent_labels: Vec::new(),
            language: Language::En,
        };

        // Act
        let result = provider.generate_topic(&request).await;

        // Assert
        match result {
            Err(ProviderError::Status(500)) => {}
            other => panic!("expected Status(500), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_topic_without_label_is_malformed() {
        let app = Router::new().route(
            "/generate-topic",
            post(|| async { Json(json!({ "distractors": ["A", "B", "C"] })) }),
        );
        let provider = provider_for(serve(app).await);
        let request = TopicRequest {
            difficulty: Difficulty::Easy,
            recent_labels: Vec::new(),
            language: Language::En,
        };

        let result = provider.generate_topic(&request).await;

        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_generate_hint_returns_trimmed_text() {
        // Arrange
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&seen);
        let app = Router::new().route(
            "/generate-banter",
            post(move |Json(body): Json<Value>| {
                let captured = Arc::clone(&captured);
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(json!({ "text": "  North, always.\n" }))
                }
            }),
        );
        let provider = provider_for(serve(app).await);

        // Act
        let text = provider.generate_hint(&hint_request()).await.unwrap();

        // Assert
        assert_eq!(text, "North, always.");
        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["topic"], "Compass");
        assert_eq!(body["botName"], "DJ_BIT");
        assert_eq!(body["botStyle"], "casual");
        assert_eq!(body["context"], json!(["DJ_GLITCH: Points somewhere."]));
    }

    #[tokio::test]
    async fn test_generate_hint_with_empty_text_is_malformed() {
        let app = Router::new().route(
            "/generate-banter",
            post(|| async { Json(json!({ "text": "   " })) }),
        );
        let provider = provider_for(serve(app).await);

        let result = provider.generate_hint(&hint_request()).await;

        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Arrange: grab a free port, then close it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let provider = provider_for(addr);

        // Act
        let result = provider.generate_hint(&hint_request()).await;

        // Assert
        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }
}
