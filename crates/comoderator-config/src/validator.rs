//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// The warnings if valid, otherwise the first error as [`ConfigError::InvalidValue`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_session(config, &mut result);
        Self::validate_monitor(config, &mut result);
        Self::validate_answer(config, &mut result);
        Self::validate_provider(config, &mut result);
        Self::validate_selectors(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.launch_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.launch_timeout_ms",
                "launch_timeout_ms must be greater than 0",
            ));
        }

        if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "Viewport dimensions must be greater than 0",
            ));
        }

        if let Some(ref path) = config.browser.executable_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.executable_path",
                    format!("{} does not exist", path.display()),
                ));
            }
        }
    }

    fn validate_session(config: &Config, result: &mut ValidationResult) {
        let session = &config.session;

        if session.bot_name.trim().is_empty() {
            result.add_error(ValidationError::new(
                "session.bot_name",
                "Bot name cannot be empty",
            ));
        }

        if session.navigation_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "session.navigation_timeout_ms",
                "navigation_timeout_ms must be greater than 0",
            ));
        }

        if session.selector_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "session.selector_timeout_ms",
                "selector_timeout_ms must be greater than 0",
            ));
        }
    }

    fn validate_monitor(config: &Config, result: &mut ValidationResult) {
        if config.monitor.poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "monitor.poll_interval_ms",
                "poll_interval_ms must be greater than 0",
            ));
        }

        if config.monitor.poll_interval_ms > 60_000 {
            result.add_warning(ValidationWarning::new(
                "monitor.poll_interval_ms",
                "poll_interval_ms is very high (>60s), questions will be answered late",
            ));
        }

        if config.monitor.seen_capacity < 2 {
            result.add_error(ValidationError::new(
                "monitor.seen_capacity",
                "seen_capacity must be at least 2",
            ));
        }
    }

    fn validate_answer(config: &Config, result: &mut ValidationResult) {
        let answer = &config.answer;

        if answer.model.is_empty() {
            result.add_error(ValidationError::new("answer.model", "Model cannot be empty"));
        }

        if !(0.0..=2.0).contains(&answer.temperature) {
            result.add_error(ValidationError::new(
                "answer.temperature",
                "temperature must be between 0 and 2",
            ));
        }

        if answer.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "answer.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if answer.confidence > 100 {
            result.add_error(ValidationError::new(
                "answer.confidence",
                "confidence must be between 0 and 100",
            ));
        }
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        let provider = &config.provider;

        if provider.resolve_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "provider.api_key",
                "API key is not set, answers will fail until OPENAI_API_KEY is provided",
            ));
        }

        if !provider.api_url.starts_with("http://") && !provider.api_url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "provider.api_url",
                "api_url must start with http:// or https://",
            ));
        }
    }

    fn validate_selectors(config: &Config, result: &mut ValidationResult) {
        for name in config.selectors.empty_affordances() {
            result.add_error(ValidationError::new(
                format!("selectors.{}", name),
                "Candidate list cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
