//! Static content bank used whenever the content provider fails.

use guesswork_core::model::{Language, Topic};

/// A built-in topic with canned hints.
#[derive(Debug, Clone, Copy)]
pub struct StaticTopic {
    /// Display label.
    pub label: &'static str,
    /// Canned hints for this topic.
    pub hints: &'static [&'static str],
}

impl StaticTopic {
    /// Materializes a fresh [`Topic`] instance for one round.
    #[must_use]
    pub fn instantiate(&self) -> Topic {
        Topic::new(
            self.label,
            self.hints.iter().map(|h| (*h).to_owned()).collect(),
        )
    }
}

const EN_TOPICS: &[StaticTopic] = &[
    StaticTopic {
        label: "Vinyl Record",
        hints: &[
            "I'm spinning right round.",
            "Analog vibes only.",
            "Don't scratch me.",
            "The groove is deep.",
            "Black circle of sound.",
        ],
    },
    StaticTopic {
        label: "Espresso",
        hints: &[
            "Small but powerful.",
            "A concentrated shot of energy.",
            "Dark, rich, and bitter.",
            "Steam and pressure created this.",
            "The heart of a latte.",
        ],
    },
    StaticTopic {
        label: "Headphones",
        hints: &[
            "Blocking out the world.",
            "Private audio experience.",
            "Two speakers on your ears.",
            "Wired or wireless freedom.",
            "Cushions for your sound.",
        ],
    },
    StaticTopic {
        label: "Cactaceae",
        hints: &[
            "Stay away from my spines.",
            "I thrive on neglect.",
            "Desert survivor.",
            "Not for hugging.",
            "Slow growing, prickly friend.",
        ],
    },
    StaticTopic {
        label: "Umbrella",
        hints: &[
            "Best friend of a rainy day.",
            "Opens over your head.",
            "Folds away after the storm.",
            "Spokes without a wheel.",
        ],
    },
    StaticTopic {
        label: "Compass",
        hints: &[
            "Always pointing north.",
            "Explorers trust me.",
            "A needle that never sews.",
            "Magnetism is my guide.",
        ],
    },
];

const AR_TOPICS: &[StaticTopic] = &[
    StaticTopic {
        label: "قهوة",
        hints: &[
            "مُرّة لكنها محبوبة.",
            "رفيقة الصباح.",
            "تُحمَّص حبوبها.",
            "ساخنة في فنجان صغير.",
        ],
    },
    StaticTopic {
        label: "مظلة",
        hints: &[
            "صديقة الأيام الممطرة.",
            "تُفتح فوق رأسك.",
            "تُطوى بعد العاصفة.",
        ],
    },
    StaticTopic {
        label: "سماعات",
        hints: &[
            "موسيقى لأذنيك فقط.",
            "تعزلك عن العالم.",
            "سلكية أو لاسلكية.",
        ],
    },
    StaticTopic {
        label: "صبار",
        hints: &[
            "ابتعد عن أشواكي.",
            "أعيش في الصحراء.",
            "لا أحتاج الكثير من الماء.",
        ],
    },
    StaticTopic {
        label: "بوصلة",
        hints: &[
            "أشير دائمًا إلى الشمال.",
            "دليل المستكشفين.",
            "إبرة لا تخيط.",
        ],
    },
];

const EN_FILLER: &[&str] = &[
    "I'm picking up on some interesting details here.",
    "This subject has quite a few layers to it.",
    "Let's focus on what makes this unique.",
    "There's a lot to consider with this one.",
    "I'm noticing a pattern in how this works.",
    "It's interesting how this fits into everything.",
    "Can you see the connection I'm making?",
    "This is definitely a distinct one.",
];

const AR_FILLER: &[&str] = &[
    "ألاحظ بعض التفاصيل المثيرة هنا.",
    "هذا الموضوع له طبقات كثيرة.",
    "لنركز على ما يجعله مميزًا.",
    "هناك الكثير لنفكر فيه هنا.",
    "هل ترى الرابط الذي أقصده؟",
];

/// Read-only table of fallback topics and filler hints per language.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticContentBank;

impl StaticContentBank {
    /// Built-in topics for a language.
    #[must_use]
    pub fn topics(self, language: Language) -> &'static [StaticTopic] {
        match language {
            Language::En => EN_TOPICS,
            Language::Ar => AR_TOPICS,
        }
    }

    /// Generic hints that fit any topic.
    #[must_use]
    pub fn filler_hints(self, language: Language) -> &'static [&'static str] {
        match language {
            Language::En => EN_FILLER,
            Language::Ar => AR_FILLER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_enough_topics_for_a_full_option_set() {
        let bank = StaticContentBank;
        for language in [Language::En, Language::Ar] {
            assert!(bank.topics(language).len() >= 4, "{language} bank too small");
            assert!(!bank.filler_hints(language).is_empty());
        }
    }

    #[test]
    fn test_labels_are_unique_within_a_language() {
        let bank = StaticContentBank;
        for language in [Language::En, Language::Ar] {
            let mut labels: Vec<_> = bank.topics(language).iter().map(|t| t.label).collect();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(labels.len(), bank.topics(language).len());
        }
    }

    #[test]
    fn test_instantiate_creates_fresh_identity_with_hints() {
        let entry = StaticContentBank.topics(Language::En)[1];

        let first = entry.instantiate();
        let second = entry.instantiate();

        assert_eq!(first.label, "Espresso");
        assert_eq!(first.hints.len(), entry.hints.len());
        assert_ne!(first.id, second.id);
    }
}
