use super::*;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.session.bot_name, "Clarify AI Bot");
    assert_eq!(config.session.navigation_timeout(), Duration::from_secs(30));
    assert_eq!(config.session.selector_timeout(), Duration::from_secs(15));
    assert_eq!(config.session.settle(), Duration::from_secs(5));
    assert_eq!(config.monitor.poll_interval(), Duration::from_millis(2000));
    assert_eq!(config.monitor.seen_capacity, 1000);
}

#[test]
fn test_answer_defaults() {
    let answer = AnswerConfig::default();
    assert_eq!(answer.model, "gpt-4");
    assert_eq!(answer.temperature, 0.2);
    assert_eq!(answer.max_tokens, 500);
    assert_eq!(answer.confidence, 85);
    assert!(answer.system_prompt.contains("co-moderator"));
}

#[test]
fn test_browser_defaults_match_launch_options() {
    let options = BrowserConfig::default().launch_options();
    let expected = comoderator_protocols::LaunchOptions::default();
    assert_eq!(options.debug_port, expected.debug_port);
    assert_eq!(options.extra_args, expected.extra_args);
    assert_eq!(options.launch_timeout, expected.launch_timeout);
    assert!(!options.headless);
}

#[test]
fn test_launch_options_expand_profile_dir() {
    let config = BrowserConfig {
        profile_dir: Some(std::path::PathBuf::from("~/profile")),
        ..BrowserConfig::default()
    };
    let options = config.launch_options();
    let dir = options.profile_dir.unwrap();
    assert!(!dir.to_string_lossy().starts_with('~'));
    assert!(dir.ends_with("profile"));
}

#[test]
fn test_provider_debug_redacts_key() {
    let provider = ProviderConfig {
        api_key: Some("sk-secret".to_string()),
        api_url: DEFAULT_API_URL.to_string(),
    };
    let debug = format!("{:?}", provider);
    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_resolve_api_key_prefers_config() {
    let provider = ProviderConfig {
        api_key: Some("sk-config".to_string()),
        ..ProviderConfig::default()
    };
    assert_eq!(provider.resolve_api_key().as_deref(), Some("sk-config"));
}

#[test]
fn test_config_serializes_to_toml() {
    let text = toml::to_string(&Config::default()).unwrap();
    assert!(text.contains("[selectors]"));
    assert!(text.contains("poll_interval_ms = 2000"));
}
