//! Selector catalog for the third-party meeting UI.
//!
//! The meeting UI has no stable markup contract, so every affordance the
//! engine touches is described by an ordered list of CSS selector candidates.
//! Candidates are always tried in priority order; the catalog is versioned and
//! loadable from configuration so markup drift only needs a catalog update.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Ordered, versioned selector candidates per UI affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorCatalog {
    /// Free-form catalog version, logged at join time.
    pub version: String,
    /// Display-name input on the pre-join screen.
    pub name_input: Vec<String>,
    /// Join / submit button on the pre-join screen.
    pub join_button: Vec<String>,
    /// One chat message row. Queried as a single selector list to keep DOM order.
    pub chat_item: Vec<String>,
    /// Sender element inside a chat row.
    pub chat_sender: Vec<String>,
    /// Message text element inside a chat row.
    pub chat_text: Vec<String>,
    /// Timestamp element inside a chat row (`data-timestamp` or text).
    pub chat_timestamp: Vec<String>,
    /// Chat composer input.
    pub chat_input: Vec<String>,
    /// Case-insensitive label of a send button, used by the fallback post path.
    pub send_button_label: String,
    /// Generic inputs filled by the fallback post path.
    pub fallback_input: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SelectorCatalog {
    fn default() -> Self {
        Self {
            version: "zoom-web-2024".to_string(),
            name_input: owned(&[
                r#"input[name="name"]"#,
                "input#inputname",
                r#"input[aria-label="Your name"]"#,
            ]),
            join_button: owned(&[
                r#"button[type="submit"]"#,
                r#"button[aria-label*="Join"]"#,
                r#"button[data-role="join-button"]"#,
                ".join-button",
            ]),
            chat_item: owned(&[".chat-item", ".chat-list-item", ".chat-message"]),
            chat_sender: owned(&[".sender-name", ".name", ".chat-item-sender"]),
            chat_text: owned(&[".chat-message-text", ".message", ".chat-text"]),
            chat_timestamp: owned(&[".time", ".timestamp"]),
            chat_input: owned(&[
                ".chat-input",
                "textarea.chat-input",
                "input.chat-input",
                r#"textarea[aria-label="Send a message"]"#,
            ]),
            send_button_label: "send".to_string(),
            fallback_input: owned(&["textarea", r#"input[type="text"]"#]),
        }
    }
}

impl SelectorCatalog {
    /// Names of affordances whose candidate list is empty.
    pub fn empty_affordances(&self) -> Vec<&'static str> {
        let lists: [(&'static str, &Vec<String>); 7] = [
            ("name_input", &self.name_input),
            ("join_button", &self.join_button),
            ("chat_item", &self.chat_item),
            ("chat_sender", &self.chat_sender),
            ("chat_text", &self.chat_text),
            ("chat_timestamp", &self.chat_timestamp),
            ("chat_input", &self.chat_input),
        ];
        lists
            .into_iter()
            .filter(|(_, list)| list.is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

/// Return the first candidate, in priority order, for which `matches` answers true.
///
/// The check is only called until the first match; later candidates are not
/// touched.
pub async fn resolve<'a, F, Fut>(candidates: &'a [String], mut matches: F) -> Option<&'a str>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = bool>,
{
    for candidate in candidates {
        if matches(candidate.as_str()).await {
            return Some(candidate.as_str());
        }
    }
    None
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
