//! Content provider abstraction.
//!
//! A content provider produces topics and hints on demand, usually by
//! relaying to a text-generation service. Each call is a single attempt:
//! implementations never retry, and callers treat every error as "no
//! content" rather than as a fatal condition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::model::{Difficulty, Language, PersonaStyle};

/// Parameters for generating a new topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRequest {
    /// Tier the topic should fit.
    pub difficulty: Difficulty,
    /// Labels used recently, to steer generation away from repeats.
    pub recent_labels: Vec<String>,
    /// Language of the label and distractors.
    pub language: Language,
}

/// A generated topic label with its wrong answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTopic {
    /// The correct answer.
    pub label: String,
    /// Plausible wrong answers; callers use at most three.
    pub distractors: Vec<String>,
}

/// Parameters for generating a single hint line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintRequest {
    /// Label of the hidden topic.
    pub topic_label: String,
    /// Name of the speaking persona.
    pub persona_name: String,
    /// Style of the speaking persona.
    pub persona_style: PersonaStyle,
    /// Recent conversation lines, formatted `"Name: text"`.
    pub recent_context: Vec<String>,
    /// Tier of the current round.
    pub difficulty: Difficulty,
    /// Language of the hint.
    pub language: Language,
}

/// Source of generated game content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate a topic and its distractors.
    async fn generate_topic(&self, request: &TopicRequest) -> Result<GeneratedTopic, ProviderError>;

    /// Generate one short hint about a topic.
    async fn generate_hint(&self, request: &HintRequest) -> Result<String, ProviderError>;
}
