//! Events published by the engine to its host.

use serde::{Deserialize, Serialize};

use super::{Answer, ChatEntry, EngineState};

/// Fixed, enumerated set of engine events.
///
/// Serialized as internally tagged JSON, e.g. `{"type":"chat-message",...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EngineEvent {
    /// A chat entry seen for the first time.
    ChatMessage(ChatEntry),
    /// An answer was generated (and a post attempted).
    AiResponse(Answer),
    /// Answer generation failed for one entry.
    #[serde(rename_all = "camelCase")]
    ProcessingError {
        error: String,
        original_entry: ChatEntry,
    },
    /// An answer could not be injected into the meeting chat.
    #[serde(rename_all = "camelCase")]
    PostError {
        error: String,
        attempted_text: String,
    },
    /// The engine moved to a new lifecycle state.
    StateChanged { state: EngineState },
}

impl EngineEvent {
    /// Event name as seen by hosts.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::ChatMessage(_) => "chat-message",
            EngineEvent::AiResponse(_) => "ai-response",
            EngineEvent::ProcessingError { .. } => "processing-error",
            EngineEvent::PostError { .. } => "post-error",
            EngineEvent::StateChanged { .. } => "state-changed",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
