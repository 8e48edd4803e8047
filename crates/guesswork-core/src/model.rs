//! Game model shared across crates: tiers, languages, topics, personas.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty tier of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Rounds 1 through 5.
    #[default]
    Easy,
    /// Rounds 6 through 13.
    Medium,
    /// Round 14 onwards.
    Hard,
}

impl Difficulty {
    /// Returns the tier for a 1-based round number.
    #[must_use]
    pub fn for_round(round: u32) -> Self {
        match round {
            0..=5 => Self::Easy,
            6..=13 => Self::Medium,
            _ => Self::Hard,
        }
    }

    /// Wire name of the tier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language used for topics and hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Arabic.
    Ar,
}

impl Language {
    /// Wire name of the language.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A guessable topic.
///
/// Every instance carries a fresh identity, so two topics with the same
/// label are still distinct choices. Equality is by identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Identity of this instance.
    pub id: Uuid,
    /// Display label.
    pub label: String,
    /// Canned hints; empty for generated topics and distractors.
    pub hints: Vec<String>,
}

impl Topic {
    /// Creates a topic with a fresh identity.
    #[must_use]
    pub fn new(label: impl Into<String>, hints: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            hints,
        }
    }

    /// Creates a throwaway topic used only as a wrong answer.
    #[must_use]
    pub fn distractor(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }
}

impl PartialEq for Topic {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Topic {}

/// Speaking style of a persona, passed to the content provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaStyle {
    Terse,
    Chatty,
    Formal,
    Casual,
}

impl PersonaStyle {
    /// Wire name of the style.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Terse => "terse",
            Self::Chatty => "chatty",
            Self::Formal => "formal",
            Self::Casual => "casual",
        }
    }
}

/// A non-player character that emits hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    /// Stable identifier, referenced by messages and the typing set.
    pub id: &'static str,
    /// Display name, also used as the speaker in conversation context.
    pub name: &'static str,
    /// Speaking style.
    pub style: PersonaStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_for_round_follows_tier_boundaries() {
        assert_eq!(Difficulty::for_round(1), Difficulty::Easy);
        assert_eq!(Difficulty::for_round(5), Difficulty::Easy);
        assert_eq!(Difficulty::for_round(6), Difficulty::Medium);
        assert_eq!(Difficulty::for_round(13), Difficulty::Medium);
        assert_eq!(Difficulty::for_round(14), Difficulty::Hard);
        assert_eq!(Difficulty::for_round(40), Difficulty::Hard);
    }

    #[test]
    fn test_topics_with_same_label_are_distinct() {
        let a = Topic::new("Espresso", Vec::new());
        let b = Topic::new("Espresso", Vec::new());

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_enums_serialize_to_wire_names() {
        assert_eq!(serde_json::to_value(Difficulty::Medium).unwrap(), "medium");
        assert_eq!(serde_json::to_value(Language::Ar).unwrap(), "ar");
        assert_eq!(serde_json::to_value(PersonaStyle::Casual).unwrap(), "casual");
        let lang: Language = serde_json::from_value(serde_json::json!("en")).unwrap();
        assert_eq!(lang, Language::En);
    }
}
