//! Chat entries observed in the meeting UI.

use serde::{Deserialize, Serialize};

/// Sender used when the UI does not expose one.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// One chat message as read from the page during a poll tick.
///
/// Entries are never mutated after extraction. `observed_at` is whatever the
/// UI supplied (ISO-8601 or a display string), or the extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    #[serde(default = "default_sender")]
    pub sender: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub observed_at: String,
}

fn default_sender() -> String {
    UNKNOWN_SENDER.to_string()
}

impl ChatEntry {
    pub fn new(
        sender: impl Into<String>,
        text: impl Into<String>,
        observed_at: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            observed_at: observed_at.into(),
        }
    }
}
