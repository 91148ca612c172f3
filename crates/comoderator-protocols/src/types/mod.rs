//! Data model shared across the engine and its host.

mod answer;
mod chat;
mod event;
mod session;

pub use answer::Answer;
pub use chat::ChatEntry;
pub use event::EngineEvent;
pub use session::{EngineState, SessionHandle};
