//! Answer generation through a completion provider.

use std::sync::Arc;

use tracing::debug;

use comoderator_protocols::{Answer, ChatEntry, CompletionProvider, CompletionRequest, ProviderError};

use crate::error::EngineError;
use crate::scorer::{ConfidenceScorer, FixedConfidence};

/// Completion parameters sent with every question.
#[derive(Debug, Clone)]
pub struct AnswerSettings {
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AnswerSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            system_prompt:
                "You are an AI co-moderator. Analyze if this is a question and provide a helpful answer."
                    .to_string(),
            temperature: 0.2,
            max_tokens: 500,
        }
    }
}

/// Turns a question into an [`Answer`]. Never retries.
pub struct AnswerGenerator {
    provider: Arc<dyn CompletionProvider>,
    scorer: Arc<dyn ConfidenceScorer>,
    settings: AnswerSettings,
}

impl AnswerGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: AnswerSettings) -> Self {
        Self {
            provider,
            scorer: Arc::new(FixedConfidence::default()),
            settings,
        }
    }

    /// Replace the confidence scorer.
    pub fn with_scorer(mut self, scorer: Arc<dyn ConfidenceScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn settings(&self) -> &AnswerSettings {
        &self.settings
    }

    /// Ask the provider to answer `entry.text`.
    ///
    /// Provider failures and blank answers become
    /// [`EngineError::AnswerGenerationError`].
    pub async fn generate(&self, entry: &ChatEntry) -> Result<Answer, EngineError> {
        let request = CompletionRequest::new(&self.settings.model, &entry.text)
            .with_system(&self.settings.system_prompt)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        debug!(
            "Requesting answer from {} (model {})",
            self.provider.id(),
            self.settings.model
        );

        let text = self
            .provider
            .complete(request)
            .await
            .map_err(|e| EngineError::AnswerGenerationError(e.to_string()))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(EngineError::AnswerGenerationError(
                ProviderError::EmptyResponse.to_string(),
            ));
        }

        let confidence = self.scorer.score(&entry.text, text);
        Ok(Answer::new(entry.text.clone(), text, confidence))
    }
}
