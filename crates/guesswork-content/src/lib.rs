//! Guesswork — content sources.
//!
//! Static fallback content, the persona roster, and the HTTP relay to the
//! text-generation service.

pub mod http_provider;
pub mod personas;
pub mod static_bank;

pub use http_provider::HttpContentProvider;
pub use personas::PERSONAS;
pub use static_bank::{StaticContentBank, StaticTopic};
