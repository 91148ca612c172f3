//! Session handle and engine lifecycle state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one live meeting session of an engine. Created at join, dropped at leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHandle {
    pub session_id: String,
    pub meeting_link: String,
    pub started_at: DateTime<Utc>,
}

impl SessionHandle {
    pub fn new(session_id: impl Into<String>, meeting_link: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            meeting_link: meeting_link.into(),
            started_at: Utc::now(),
        }
    }
}

/// Engine lifecycle state.
///
/// `Idle -> Joining -> Monitoring | Failed`, `Monitoring | Failed -> Leaving -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EngineState {
    Idle = 0,
    Joining = 1,
    Monitoring = 2,
    Leaving = 3,
    Closed = 4,
    Failed = 5,
}

impl From<u8> for EngineState {
    fn from(v: u8) -> Self {
        match v {
            1 => EngineState::Joining,
            2 => EngineState::Monitoring,
            3 => EngineState::Leaving,
            4 => EngineState::Closed,
            5 => EngineState::Failed,
            _ => EngineState::Idle,
        }
    }
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Joining => "joining",
            EngineState::Monitoring => "monitoring",
            EngineState::Leaving => "leaving",
            EngineState::Closed => "closed",
            EngineState::Failed => "failed",
        }
    }

    /// A session may be started from this state.
    pub fn can_join(&self) -> bool {
        matches!(
            self,
            EngineState::Idle | EngineState::Closed | EngineState::Failed
        )
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
