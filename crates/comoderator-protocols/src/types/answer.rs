//! Generated answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An answer produced for one qualifying chat entry. Not persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question: String,
    pub answer: String,
    /// 0-100.
    pub confidence: u8,
    pub generated_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, confidence: u8) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            confidence: confidence.min(100),
            generated_at: Utc::now(),
        }
    }
}
