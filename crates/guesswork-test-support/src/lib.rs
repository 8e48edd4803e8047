//! Shared test doubles for the Guesswork game engine.

mod clock;
mod feedback;
mod ledger_store;
mod provider;
mod rng;

pub use clock::FixedClock;
pub use feedback::RecordingFeedback;
pub use ledger_store::{FailingLedgerStore, InMemoryLedgerStore};
pub use provider::{FailingContentProvider, GatedContentProvider, ScriptedContentProvider};
pub use rng::{MockRng, SequenceRng};
