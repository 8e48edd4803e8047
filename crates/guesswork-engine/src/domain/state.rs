//! The authoritative game state and its synchronous transitions.
//!
//! Every method here re-checks the current phase before mutating, so a
//! transition requested against outdated assumptions is a no-op. The
//! application layer relies on this when guesses and timer ticks race.

use chrono::{DateTime, Utc};
use guesswork_core::model::{Difficulty, Language, Topic};
use serde::Serialize;
use uuid::Uuid;

use super::badges::Badge;
use crate::config::EngineConfig;

/// Phase of the game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    #[default]
    Start,
    DifficultySelect,
    Playing,
    RoundOver,
}

/// How the most recent round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    Win,
    Loss,
    Timeout,
}

/// A hint line shown in the round's conversation.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message identifier.
    pub id: Uuid,
    /// Persona that spoke.
    pub persona_id: String,
    /// Hint text.
    pub text: String,
    /// When the message appeared.
    pub timestamp: DateTime<Utc>,
}

/// Result of resolving a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    /// Win or loss.
    pub result: RoundResult,
    /// Points added to the score.
    pub points: u32,
    /// Badge unlocked by this guess.
    pub badge: Option<Badge>,
}

/// Outcome of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not playing; the countdown should stop.
    Idle,
    /// One second elapsed, time remains.
    Running,
    /// Time ran out and the round ended.
    Expired,
}

/// Complete game state, owned by the round engine.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub language: Language,
    pub current_topic: Option<Topic>,
    pub options: Vec<Topic>,
    pub messages: Vec<Message>,
    pub score: u32,
    pub time_left: u32,
    pub round: u32,
    pub is_typing: Vec<String>,
    pub lives: u32,
    pub last_result: Option<RoundResult>,
    pub badges: Vec<Badge>,
    pub showing_award: Option<Badge>,
}

impl GameState {
    /// Fresh state in the Start phase.
    #[must_use]
    pub fn new(language: Language, config: &EngineConfig) -> Self {
        Self {
            phase: GamePhase::Start,
            difficulty: Difficulty::Easy,
            language,
            current_topic: None,
            options: Vec::new(),
            messages: Vec::new(),
            score: 0,
            time_left: config.round_duration_secs,
            round: 1,
            is_typing: Vec::new(),
            lives: config.starting_lives,
            last_result: None,
            badges: Vec::new(),
            showing_award: None,
        }
    }

    /// Resets everything a run accumulates. A round in play is closed as
    /// `RoundOver`, since the topic and options are cleared; any other phase
    /// is kept. The phase becomes `Playing` once the first round is installed.
    pub fn begin_run(&mut self, config: &EngineConfig) {
        let phase = match self.phase {
            GamePhase::Playing => GamePhase::RoundOver,
            phase => phase,
        };
        *self = Self::new(self.language, config);
        self.phase = phase;
    }

    /// Whether the run has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Installs a new round and enters `Playing`.
    pub fn install_round(&mut self, topic: Topic, options: Vec<Topic>, duration_secs: u32) {
        debug_assert_eq!(
            options.iter().filter(|o| **o == topic).count(),
            1,
            "options must contain the topic exactly once"
        );
        self.phase = GamePhase::Playing;
        self.difficulty = Difficulty::for_round(self.round);
        self.current_topic = Some(topic);
        self.options = options;
        self.messages.clear();
        self.is_typing.clear();
        self.last_result = None;
        self.time_left = duration_secs;
    }

    /// Resolves a guess. Returns `None` (and changes nothing) unless a round
    /// is being played.
    pub fn resolve_guess(&mut self, choice_id: Uuid) -> Option<GuessOutcome> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let correct = self.current_topic.as_ref()?.id == choice_id;

        let outcome = if correct {
            let points = self.time_left.saturating_mul(10);
            self.score = self.score.saturating_add(points);
            let badge = Badge::for_round(self.round).filter(|b| !self.badges.contains(b));
            if let Some(badge) = badge {
                self.badges.push(badge);
                self.lives += 1;
                self.showing_award = Some(badge);
            }
            GuessOutcome {
                result: RoundResult::Win,
                points,
                badge,
            }
        } else {
            self.lives = self.lives.saturating_sub(1);
            GuessOutcome {
                result: RoundResult::Loss,
                points: 0,
                badge: None,
            }
        };

        self.end_round(outcome.result);
        Some(outcome)
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        if self.phase != GamePhase::Playing {
            return Tick::Idle;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.end_round(RoundResult::Timeout);
            return Tick::Expired;
        }
        self.time_left -= 1;
        Tick::Running
    }

    /// Dismisses the badge celebration.
    pub fn close_award(&mut self) {
        self.showing_award = None;
    }

    fn end_round(&mut self, result: RoundResult) {
        self.phase = GamePhase::RoundOver;
        self.last_result = Some(result);
        self.is_typing.clear();
    }
}
