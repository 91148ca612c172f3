//! Answer confidence scoring.

/// Confidence reported when nothing better is known.
pub const DEFAULT_CONFIDENCE: u8 = 85;

/// Assigns a 0-100 confidence to a generated answer.
pub trait ConfidenceScorer: Send + Sync {
    fn score(&self, question: &str, answer: &str) -> u8;
}

/// Returns the same confidence for every answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConfidence(pub u8);

impl Default for FixedConfidence {
    fn default() -> Self {
        Self(DEFAULT_CONFIDENCE)
    }
}

impl ConfidenceScorer for FixedConfidence {
    fn score(&self, _question: &str, _answer: &str) -> u8 {
        self.0.min(100)
    }
}
