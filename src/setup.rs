//! Builds an engine from configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use comoderator_browser_chrome::ChromeLauncher;
use comoderator_config::{Config, ConfigError, ConfigLoader};
use comoderator_core::{AnswerGenerator, AnswerSettings, Engine, EngineConfig, FixedConfidence};
use comoderator_provider_openai::OpenAIProvider;

/// Get the .comoderator directory path.
pub(crate) fn comoderator_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".comoderator"))
        .unwrap_or_else(|| PathBuf::from(".comoderator"))
}

/// Load `path`, falling back to defaults when the file does not exist.
pub(crate) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    match ConfigLoader::load(path) {
        Ok(config) => {
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        Err(ConfigError::NotFound(_)) => {
            warn!("Config file {} not found, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

pub(crate) fn engine_config(config: &Config) -> EngineConfig {
    EngineConfig {
        bot_name: config.session.bot_name.clone(),
        launch: config.browser.launch_options(),
        navigation_timeout: config.session.navigation_timeout(),
        selector_timeout: config.session.selector_timeout(),
        settle: config.session.settle(),
        poll_interval: config.monitor.poll_interval(),
        seen_capacity: config.monitor.seen_capacity,
    }
}

pub(crate) fn answer_settings(config: &Config) -> AnswerSettings {
    AnswerSettings {
        model: config.answer.model.clone(),
        system_prompt: config.answer.system_prompt.clone(),
        temperature: config.answer.temperature,
        max_tokens: config.answer.max_tokens,
    }
}

/// Wire the Chrome backend and the OpenAI provider into an engine.
pub(crate) fn build_engine(config: &Config) -> Engine {
    let api_key = config.provider.resolve_api_key().unwrap_or_else(|| {
        warn!("No completion API key configured; answers will fail until one is set");
        String::new()
    });
    let provider = OpenAIProvider::with_url(api_key, config.provider.api_url.clone());

    let generator = AnswerGenerator::new(Arc::new(provider), answer_settings(config))
        .with_scorer(Arc::new(FixedConfidence(config.answer.confidence)));

    Engine::new(
        engine_config(config),
        config.selectors.clone(),
        Arc::new(ChromeLauncher::new()),
        generator,
    )
}
