//! Persona hint loop.
//!
//! Each turn picks the next persona, shows it typing, composes a hint and
//! reveals it no earlier than the turn's minimum typing time. Revealing a
//! hint schedules the following turn after a pacing pause, so the loop
//! runs until the round ends and its timers are aborted.

use std::time::Duration;

use guesswork_core::feedback::Cue;
use guesswork_core::model::{Persona, Topic};
use guesswork_core::provider::HintRequest;
use guesswork_core::rng::{self, DeterministicRng, choose};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};
use uuid::Uuid;

use super::round_engine::RoundEngine;
use crate::config::EngineConfig;
use crate::domain::state::{GamePhase, Message};

/// Per-round scheduler memory: hints produced so far and whose turn it is.
#[derive(Debug, Default)]
pub(crate) struct RoundHints {
    generated: Vec<String>,
    persona_cursor: Option<usize>,
}

impl RoundHints {
    pub(crate) fn reset(&mut self) {
        self.generated.clear();
        self.persona_cursor = None;
    }

    fn advance_cursor(&mut self, len: usize) -> usize {
        let next = self.persona_cursor.map_or(0, |i| (i + 1) % len);
        self.persona_cursor = Some(next);
        next
    }

    /// Next persona in round-robin order that is not already typing.
    fn next_persona(&mut self, personas: &[Persona], typing: &[String]) -> Option<Persona> {
        for _ in 0..personas.len() {
            let persona = personas[self.advance_cursor(personas.len())];
            if !typing.iter().any(|id| id == persona.id) {
                return Some(persona);
            }
        }
        None
    }

    fn remember(&mut self, text: &str) {
        if !self.generated.iter().any(|h| h == text) {
            self.generated.push(text.to_owned());
        }
    }

    /// Occasionally replays an earlier hint once enough distinct ones exist.
    fn pick_repeat(&self, rng: &mut dyn DeterministicRng, config: &EngineConfig) -> Option<String> {
        if self.generated.len() < config.repeat_min_hints {
            return None;
        }
        if rng.next_f64() >= config.repeat_chance {
            return None;
        }
        choose(rng, &self.generated).cloned()
    }
}

/// Everything a turn needs after it leaves the state lock.
#[derive(Debug)]
pub(crate) struct HintTurn {
    generation: u64,
    persona: Persona,
    request: HintRequest,
    canned: Vec<String>,
    repeat: Option<String>,
    typing_for: Duration,
}

fn conversation_line(personas: &[Persona], message: &Message) -> String {
    let speaker = personas
        .iter()
        .find(|p| p.id == message.persona_id)
        .map_or(message.persona_id.as_str(), |p| p.name);
    format!("{speaker}: {}", message.text)
}

impl RoundEngine {
    /// Spawns a hint turn that starts after `delay`.
    pub(super) fn spawn_hint_turn(
        &self,
        generation: u64,
        delay: Duration,
        first: bool,
    ) -> JoinHandle<()> {
        let engine = self.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            engine.run_hint_turn(generation, first).await;
        })
    }

    async fn run_hint_turn(&self, generation: u64, first: bool) {
        let Some(turn) = self.begin_hint_turn(generation, first) else {
            return;
        };
        let started = Instant::now();
        let text = self.compose_hint(&turn).await;

        let remaining = turn.typing_for.saturating_sub(started.elapsed());
        if !remaining.is_zero() {
            sleep(remaining).await;
        }
        self.reveal_hint(&turn, text);
    }

    /// Picks a persona, marks it typing and captures the request context.
    /// Returns `None` if the round has moved on.
    pub(crate) fn begin_hint_turn(&self, generation: u64, first: bool) -> Option<HintTurn> {
        let personas = &self.inner.deps.personas;
        let config = &self.inner.config;

        let mut guard = self.state();
        let state = &mut *guard;
        if state.generation != generation || state.game.phase != GamePhase::Playing {
            return None;
        }
        let Topic { label, hints, .. } = state.game.current_topic.clone()?;
        let persona = state.hints.next_persona(personas, &state.game.is_typing)?;
        state.game.is_typing.push(persona.id.to_owned());

        let start = state.game.messages.len().saturating_sub(config.context_window);
        let recent_context = state.game.messages[start..]
            .iter()
            .map(|m| conversation_line(personas, m))
            .collect();

        let mut rng = rng::lock(&self.inner.deps.rng);
        let typing_for = if first {
            config.first_typing_delay
        } else {
            config.typing_delay.sample(&mut *rng)
        };
        let repeat = state.hints.pick_repeat(&mut *rng, config);
        drop(rng);

        debug!(persona = persona.name, repeat = repeat.is_some(), "persona typing");
        Some(HintTurn {
            generation,
            persona,
            request: HintRequest {
                topic_label: label,
                persona_name: persona.name.to_owned(),
                persona_style: persona.style,
                recent_context,
                difficulty: state.game.difficulty,
                language: state.game.language,
            },
            canned: hints,
            repeat,
            typing_for,
        })
    }

    /// Produces the hint text: a replay, a generated line, or a canned or
    /// filler line when the provider fails.
    pub(crate) async fn compose_hint(&self, turn: &HintTurn) -> String {
        if let Some(text) = &turn.repeat {
            return text.clone();
        }

        let text = match self.inner.deps.provider.generate_hint(&turn.request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    error = %e,
                    persona = turn.persona.name,
                    "hint generation failed; using canned hint"
                );
                self.fallback_hint(turn)
            }
        };

        let mut state = self.state();
        if state.generation == turn.generation {
            state.hints.remember(&text);
        }
        text
    }

    fn fallback_hint(&self, turn: &HintTurn) -> String {
        let mut rng = rng::lock(&self.inner.deps.rng);
        if let Some(hint) = choose(&mut *rng, &turn.canned) {
            return hint.clone();
        }
        let filler = self.inner.deps.bank.filler_hints(turn.request.language);
        choose(&mut *rng, filler).map_or_else(String::new, |h| (*h).to_owned())
    }

    /// Appends the hint and schedules the next turn. Returns `false`, having
    /// changed nothing, if the turn's round is no longer being played.
    pub(crate) fn reveal_hint(&self, turn: &HintTurn, text: String) -> bool {
        {
            let mut state = self.state();
            if state.generation != turn.generation || state.game.phase != GamePhase::Playing {
                debug!(persona = turn.persona.name, "discarding hint for an ended round");
                return false;
            }

            state.game.messages.push(Message {
                id: Uuid::new_v4(),
                persona_id: turn.persona.id.to_owned(),
                text,
                timestamp: self.inner.deps.clock.now(),
            });
            state.game.is_typing.retain(|id| id != turn.persona.id);

            let pause = self
                .inner
                .config
                .message_interval
                .sample(&mut *rng::lock(&self.inner.deps.rng));
            let next = self.spawn_hint_turn(turn.generation, pause, false);
            state.timers.retain(|t| !t.is_finished());
            state.timers.push(next);
        }

        self.inner.deps.feedback.play(Cue::Blip);
        true
    }
}
