//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use comoderator_protocols::SelectorCatalog;

mod schema_answer;
mod schema_browser;

pub use schema_answer::*;
pub use schema_browser::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub answer: AnswerConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub selectors: SelectorCatalog,
}

/// Join protocol configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Display name typed on the pre-join screen.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_ms: u64,

    #[serde(default = "default_selector_timeout")]
    pub selector_timeout_ms: u64,

    /// Pause after clicking join, before monitoring starts.
    #[serde(default = "default_settle")]
    pub settle_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            navigation_timeout_ms: default_navigation_timeout(),
            selector_timeout_ms: default_selector_timeout(),
            settle_ms: default_settle(),
        }
    }
}

impl SessionConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

fn default_bot_name() -> String {
    "Clarify AI Bot".to_string()
}

fn default_navigation_timeout() -> u64 {
    30_000
}

fn default_selector_timeout() -> u64 {
    15_000
}

fn default_settle() -> u64 {
    5_000
}

/// Chat monitoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Ceiling of the already-seen set.
    #[serde(default = "default_seen_capacity")]
    pub seen_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            seen_capacity: default_seen_capacity(),
        }
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval() -> u64 {
    2_000
}

fn default_seen_capacity() -> usize {
    1_000
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
