//! Topic selection from the static content bank.

use guesswork_content::static_bank::{StaticContentBank, StaticTopic};
use guesswork_core::model::Language;
use guesswork_core::rng::{DeterministicRng, pick_index, shuffle};

use super::topic_cache::TopicDraw;

/// Draws a topic and three bank distractors, shuffled.
///
/// Labels in `recent` are avoided while any other topic remains; once the
/// whole bank has been used recently, the full list is reused.
pub fn static_draw(
    bank: StaticContentBank,
    language: Language,
    recent: &[String],
    rng: &mut dyn DeterministicRng,
) -> TopicDraw {
    let table = bank.topics(language);
    let fresh: Vec<&StaticTopic> = table
        .iter()
        .filter(|t| !recent.iter().any(|r| r == t.label))
        .collect();
    let source: Vec<&StaticTopic> = if fresh.is_empty() {
        table.iter().collect()
    } else {
        fresh
    };

    let chosen = source[pick_index(rng, source.len())];
    let topic = chosen.instantiate();

    let mut others: Vec<&StaticTopic> = table.iter().filter(|t| t.label != chosen.label).collect();
    shuffle(rng, &mut others);

    let mut options: Vec<_> = others.into_iter().take(3).map(StaticTopic::instantiate).collect();
    options.push(topic.clone());
    shuffle(rng, &mut options);

    TopicDraw { topic, options }
}
