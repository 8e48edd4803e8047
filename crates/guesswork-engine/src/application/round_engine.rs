//! The round engine: single owner of the game state.
//!
//! Player operations are synchronous; anything slow (topic fetches, hint
//! pacing, the countdown) runs on spawned tasks. Every task captures the
//! engine's generation when it starts and re-checks it before mutating, so
//! a task outlived by its round does nothing. Leaving a phase also aborts
//! the timers that belong to it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use guesswork_content::{PERSONAS, StaticContentBank};
use guesswork_core::clock::{Clock, SystemClock};
use guesswork_core::error::GameError;
use guesswork_core::feedback::{Cue, FeedbackSink, TracingFeedback};
use guesswork_core::model::{Difficulty, Language, Persona};
use guesswork_core::provider::ContentProvider;
use guesswork_core::rng::{self, SharedRng, SystemRng};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};
use uuid::Uuid;

use super::hint_scheduler::RoundHints;
use super::recency_ledger::RecencyLedger;
use super::static_fallback::static_draw;
use super::topic_cache::{TopicCache, TopicDraw};
use crate::config::EngineConfig;
use crate::domain::state::{GamePhase, GameState, GuessOutcome, RoundResult, Tick};

/// External collaborators of the engine.
pub struct EngineDeps {
    pub provider: Arc<dyn ContentProvider>,
    pub clock: Arc<dyn Clock>,
    pub rng: SharedRng,
    pub feedback: Arc<dyn FeedbackSink>,
    pub bank: StaticContentBank,
    /// Speaking order of the hint personas.
    pub personas: Vec<Persona>,
}

impl EngineDeps {
    /// Production wiring around `provider`: system clock and RNG, the
    /// built-in bank and roster, cues written to the trace log.
    #[must_use]
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        let rng: SharedRng = Arc::new(Mutex::new(SystemRng::new()));
        Self {
            provider,
            clock: Arc::new(SystemClock),
            rng,
            feedback: Arc::new(TracingFeedback),
            bank: StaticContentBank,
            personas: PERSONAS.to_vec(),
        }
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    #[serde(flatten)]
    pub state: GameState,
    /// True while a round's topic is being fetched.
    pub is_loading: bool,
}

pub(super) struct EngineState {
    pub(super) game: GameState,
    pub(super) loading: bool,
    pub(super) generation: u64,
    pub(super) hints: RoundHints,
    pub(super) timers: Vec<JoinHandle<()>>,
}

pub(super) struct EngineInner {
    pub(super) state: Mutex<EngineState>,
    pub(super) deps: EngineDeps,
    pub(super) config: EngineConfig,
    pub(super) topics: TopicCache,
    pub(super) ledger: RecencyLedger,
}

/// Drives a game from the start screen through rounds to game over.
///
/// Cheap to clone; clones share the same game.
#[derive(Clone)]
pub struct RoundEngine {
    pub(super) inner: Arc<EngineInner>,
}

impl std::fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("config", &self.inner.config)
            .field("topics", &self.inner.topics)
            .finish_non_exhaustive()
    }
}

impl RoundEngine {
    /// Creates an engine in the Start phase.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Configuration`] if the persona roster is empty or
    /// the config allows no lives or no time.
    pub fn new(
        deps: EngineDeps,
        ledger: RecencyLedger,
        config: EngineConfig,
    ) -> Result<Self, GameError> {
        if deps.personas.is_empty() {
            return Err(GameError::Configuration("at least one persona is required".into()));
        }
        if config.starting_lives == 0 || config.round_duration_secs == 0 {
            return Err(GameError::Configuration(
                "starting lives and round duration must be positive".into(),
            ));
        }

        let topics = TopicCache::new(deps.provider.clone(), ledger.clone(), deps.rng.clone());
        let game = GameState::new(Language::default(), &config);
        Ok(Self {
            inner: Arc::new(EngineInner {
                state: Mutex::new(EngineState {
                    game,
                    loading: false,
                    generation: 0,
                    hints: RoundHints::default(),
                    timers: Vec::new(),
                }),
                deps,
                config,
                topics,
                ledger,
            }),
        })
    }

    pub(super) fn state(&self) -> MutexGuard<'_, EngineState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current game state plus the loading flag.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let state = self.state();
        GameSnapshot {
            state: state.game.clone(),
            is_loading: state.loading,
        }
    }

    /// The topic cache, for warming and inspection.
    #[must_use]
    pub fn topics(&self) -> &TopicCache {
        &self.inner.topics
    }

    /// The recency ledger shared with the topic cache.
    #[must_use]
    pub fn ledger(&self) -> &RecencyLedger {
        &self.inner.ledger
    }

    /// Starts a background prefetch of an easy topic in the current
    /// language, so the first round can skip the provider round-trip.
    pub fn prewarm(&self) {
        let language = self.state().game.language;
        self.inner.topics.spawn_prefetch(Difficulty::Easy, language);
    }

    /// Moves from the start screen to difficulty selection.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidOperation`] outside the Start phase or
    /// once a run has started loading.
    pub fn go_to_difficulty_select(&self) -> Result<(), GameError> {
        let mut state = self.state();
        if state.loading || state.game.phase != GamePhase::Start {
            return Err(GameError::InvalidOperation(format!(
                "cannot select difficulty during {:?}",
                state.game.phase
            )));
        }
        state.game.phase = GamePhase::DifficultySelect;
        info!("entered difficulty select");
        Ok(())
    }

    /// Switches the content language. Cached topics in the old language are
    /// dropped and an easy topic is prefetched in the new one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidOperation`] outside the Start phase or
    /// once a run has started loading.
    pub fn set_language(&self, language: Language) -> Result<(), GameError> {
        {
            let mut state = self.state();
            if state.loading || state.game.phase != GamePhase::Start {
                return Err(GameError::InvalidOperation(format!(
                    "cannot change language during {:?}",
                    state.game.phase
                )));
            }
            if state.game.language == language {
                return Ok(());
            }
            state.game.language = language;
        }

        info!(%language, "language changed");
        self.inner.topics.reset();
        self.inner.topics.spawn_prefetch(Difficulty::Easy, language);
        Ok(())
    }

    /// Starts a new run from any phase: score, round, lives and badges are
    /// reset and the first round is loaded in the background. The phase
    /// becomes Playing once the round is installed.
    pub fn start_game(&self) {
        let (generation, language) = {
            let mut state = self.state();
            state.game.begin_run(&self.inner.config);
            let generation = Self::begin_round_load(&mut state);
            (generation, state.game.language)
        };
        info!(generation, "game started");
        self.spawn_round_load(generation, Difficulty::Easy, language);
    }

    /// Resolves the player's choice. Returns `None` when no round is being
    /// played, including a second guess in a round that already ended.
    pub fn handle_guess(&self, choice_id: Uuid) -> Option<GuessOutcome> {
        let outcome = {
            let mut state = self.state();
            let outcome = state.game.resolve_guess(choice_id)?;
            state.generation += 1;
            Self::cancel_timers(&mut state);
            info!(
                result = ?outcome.result,
                points = outcome.points,
                score = state.game.score,
                lives = state.game.lives,
                round = state.game.round,
                "guess resolved"
            );
            outcome
        };

        if let Some(badge) = outcome.badge {
            info!(badge = badge.as_str(), "badge unlocked");
        }
        self.inner.deps.feedback.play(match outcome.result {
            RoundResult::Win => Cue::Success,
            RoundResult::Loss | RoundResult::Timeout => Cue::Error,
        });
        Some(outcome)
    }

    /// Advances to the next round after one has ended.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidOperation`] unless the phase is RoundOver
    /// with lives remaining and no round already loading.
    pub fn next_round(&self) -> Result<(), GameError> {
        let (generation, difficulty, language) = {
            let mut state = self.state();
            if state.loading || state.game.phase != GamePhase::RoundOver {
                return Err(GameError::InvalidOperation(
                    "the next round is only available once a round is over".into(),
                ));
            }
            if state.game.is_game_over() {
                return Err(GameError::InvalidOperation(
                    "no lives left; start a new game".into(),
                ));
            }
            state.game.round += 1;
            let difficulty = Difficulty::for_round(state.game.round);
            let generation = Self::begin_round_load(&mut state);
            (generation, difficulty, state.game.language)
        };

        info!(generation, %difficulty, "advancing round");
        self.inner.topics.spawn_prefetch(difficulty, language);
        self.spawn_round_load(generation, difficulty, language);
        Ok(())
    }

    /// Dismisses the badge celebration. Nothing else changes.
    pub fn close_award(&self) {
        self.state().game.close_award();
    }

    /// Abandons the current run and returns to the start screen. The chosen
    /// language and earned badges are kept; an easy topic is prefetched.
    pub fn return_to_start(&self) {
        let language = {
            let mut state = self.state();
            Self::cancel_timers(&mut state);
            state.generation += 1;
            state.loading = false;
            state.hints.reset();

            let language = state.game.language;
            let badges = std::mem::take(&mut state.game.badges);
            state.game = GameState::new(language, &self.inner.config);
            state.game.badges = badges;
            language
        };
        info!("returned to start");
        self.inner.topics.spawn_prefetch(Difficulty::Easy, language);
    }

    /// Aborts every timer of the phase being left.
    pub(super) fn cancel_timers(state: &mut EngineState) {
        for timer in state.timers.drain(..) {
            timer.abort();
        }
    }

    fn begin_round_load(state: &mut EngineState) -> u64 {
        Self::cancel_timers(state);
        state.generation += 1;
        state.loading = true;
        state.hints.reset();
        state.game.difficulty = Difficulty::for_round(state.game.round);
        debug!(round = state.game.round, "loading round");
        state.generation
    }

    fn spawn_round_load(&self, generation: u64, difficulty: Difficulty, language: Language) {
        let engine = self.clone();
        tokio::spawn(async move {
            engine.load_round(generation, difficulty, language).await;
        });
    }

    async fn load_round(&self, generation: u64, difficulty: Difficulty, language: Language) {
        let draw = match self.inner.topics.get_topic(difficulty, language).await {
            Some(draw) => draw,
            None => {
                if self.state().generation != generation {
                    return;
                }
                let recent = self.inner.ledger.snapshot();
                let draw = static_draw(
                    self.inner.deps.bank,
                    language,
                    &recent,
                    &mut *rng::lock(&self.inner.deps.rng),
                );
                info!(label = %draw.topic.label, "using static topic");
                self.inner.ledger.record(&draw.topic.label).await;
                draw
            }
        };
        self.install_round(generation, draw);
    }

    fn install_round(&self, generation: u64, draw: TopicDraw) {
        let mut state = self.state();
        if state.generation != generation {
            debug!(label = %draw.topic.label, "discarding topic for a superseded round");
            return;
        }

        let label = draw.topic.label.clone();
        state
            .game
            .install_round(draw.topic, draw.options, self.inner.config.round_duration_secs);
        state.loading = false;

        let countdown = self.spawn_countdown(generation);
        let first_hint = self.spawn_hint_turn(generation, Duration::ZERO, true);
        state.timers.push(countdown);
        state.timers.push(first_hint);

        info!(
            round = state.game.round,
            difficulty = %state.game.difficulty,
            %label,
            "round started"
        );
    }

    fn spawn_countdown(&self, generation: u64) -> JoinHandle<()> {
        let engine = self.clone();
        tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if !engine.tick(generation) {
                    break;
                }
            }
        })
    }

    /// One countdown step. Returns whether the countdown should continue.
    fn tick(&self, generation: u64) -> bool {
        let mut state = self.state();
        if state.generation != generation {
            return false;
        }
        match state.game.tick() {
            Tick::Running => true,
            Tick::Idle => false,
            Tick::Expired => {
                state.generation += 1;
                Self::cancel_timers(&mut state);
                info!(round = state.game.round, lives = state.game.lives, "round timed out");
                false
            }
        }
    }
}
