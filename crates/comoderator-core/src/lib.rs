//! # Comoderator Core
//!
//! The meeting-automation engine: joins a web meeting through a
//! [`BrowserSession`](comoderator_protocols::BrowserSession), polls the chat,
//! answers questions through a
//! [`CompletionProvider`](comoderator_protocols::CompletionProvider) and posts
//! the answers back.
//!
//! ## Components
//!
//! - [`Engine`] - join/monitor/leave lifecycle and event publication
//! - [`ChatMonitor`] - one chat extraction per tick
//! - [`SeenSet`] / [`MessageIdentity`] - bounded deduplication
//! - [`QuestionFilter`] / [`ConfidenceScorer`] - replaceable policies
//! - [`AnswerGenerator`] - completion call producing an [`Answer`](comoderator_protocols::Answer)
//! - [`ChatPoster`] - answer injection with fallback strategies
//! - [`EventBus`] - broadcast of [`EngineEvent`](comoderator_protocols::EngineEvent)s

pub mod answer;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod events;
pub mod filter;
pub mod monitor;
pub mod poster;
pub mod scorer;
pub mod scripts;

#[cfg(test)]
mod test_support;

pub use answer::{AnswerGenerator, AnswerSettings};
pub use dedup::{MessageIdentity, SeenSet, DEFAULT_SEEN_CAPACITY};
pub use engine::{Engine, EngineConfig};
pub use error::EngineError;
pub use events::EventBus;
pub use filter::{QuestionFilter, QuestionMarkFilter};
pub use monitor::ChatMonitor;
pub use poster::ChatPoster;
pub use scorer::{ConfidenceScorer, FixedConfidence, DEFAULT_CONFIDENCE};
