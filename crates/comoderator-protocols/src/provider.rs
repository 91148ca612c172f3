//! Completion capability protocol.

use async_trait::async_trait;

use crate::error::ProviderError;

/// A single-turn completion request: one system instruction, one user prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: Option<String>,
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// External language-model completion capability.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Generate the completion text for `request`.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("gpt-4", "What time is it?")
            .with_system("Be brief.")
            .with_temperature(0.2)
            .with_max_tokens(500);
        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.system.as_deref(), Some("Be brief."));
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(500));
    }

    #[test]
    fn test_request_defaults() {
        let request = CompletionRequest::new("gpt-4", "hi");
        assert!(request.system.is_none());
        assert!(request.temperature.is_none());
        assert!(request.max_tokens.is_none());
    }
}
