use super::*;

fn question() -> CompletionRequest {
    CompletionRequest::new("gpt-4", "What is the agenda?")
        .with_system("You are an AI co-moderator.")
        .with_temperature(0.2)
        .with_max_tokens(500)
}

#[test]
fn test_provider_id() {
    let provider = OpenAIProvider::new("test-key".to_string());
    assert_eq!(provider.id(), "openai");
}

#[test]
fn test_provider_default_url() {
    let provider = OpenAIProvider::new("key".to_string());
    assert_eq!(provider.api_url(), DEFAULT_API_URL);
    assert_eq!(DEFAULT_API_URL, "https://api.openai.com/v1/chat/completions");
}

#[test]
fn test_custom_url() {
    let provider = OpenAIProvider::with_url(
        "test-key".to_string(),
        "https://custom.api/v1".to_string(),
    );
    assert_eq!(provider.api_url(), "https://custom.api/v1");
}

#[test]
fn test_debug_redacts_key() {
    let provider = OpenAIProvider::new("sk-secret-value".to_string());
    let debug = format!("{:?}", provider);
    assert!(!debug.contains("sk-secret-value"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_build_request_system_then_user() {
    let provider = OpenAIProvider::new("key".to_string());
    let api_request = provider.build_request(&question());

    assert_eq!(api_request.model, "gpt-4");
    assert_eq!(api_request.messages.len(), 2);
    assert_eq!(api_request.messages[0].role, "system");
    assert_eq!(api_request.messages[1].role, "user");
    assert_eq!(api_request.messages[1].content, "What is the agenda?");
    assert_eq!(api_request.max_tokens, Some(500));
    assert_eq!(api_request.temperature, Some(0.2));
}

#[test]
fn test_build_request_without_system() {
    let provider = OpenAIProvider::new("key".to_string());
    let api_request = provider.build_request(&CompletionRequest::new("gpt-4", "hi?"));
    assert_eq!(api_request.messages.len(), 1);
    assert_eq!(api_request.messages[0].role, "user");
}

// Wiremock-based tests for actual HTTP calls
mod http_tests {
    use super::*;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn completion_body(content: serde_json::Value) -> String {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/"))
            .and(matchers::header("Authorization", "Bearer test-key"))
            .and(matchers::body_partial_json(serde_json::json!({
                "model": "gpt-4",
                "max_tokens": 500,
                "messages": [
                    {"role": "system", "content": "You are an AI co-moderator."},
                    {"role": "user", "content": "What is the agenda?"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(completion_body("  Intro, then Q&A. \n".into())),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        let answer = provider.complete(question()).await.unwrap();
        assert_eq!(answer, "Intro, then Q&A.");
    }

    #[tokio::test]
    async fn test_complete_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        match provider.complete(question()).await {
            Err(ProviderError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_unauthorized() {
        let mock_server = MockServer::start().await;

        let error_body = r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error"}}"#;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("bad-key".to_string(), mock_server.uri());
        let result = provider.complete(question()).await;
        assert!(matches!(result, Err(ProviderError::AuthenticationFailed(ref m)) if m.contains("Invalid API key")));
    }

    #[tokio::test]
    async fn test_complete_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        let result = provider.complete(question()).await;
        assert!(matches!(
            result,
            Err(ProviderError::RateLimited { retry_after_seconds: 12 })
        ));
    }

    #[tokio::test]
    async fn test_complete_empty_content() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(completion_body("   ".into())))
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        let result = provider.complete(question()).await;
        assert!(matches!(result, Err(ProviderError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_complete_missing_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"choices": []}"#))
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        let result = provider.complete(question()).await;
        assert!(matches!(result, Err(ProviderError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key".to_string(), mock_server.uri());
        let result = provider.complete(question()).await;
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_complete_connection_refused() {
        let provider =
            OpenAIProvider::with_url("test-key".to_string(), "http://127.0.0.1:9".to_string());
        let result = provider.complete(question()).await;
        assert!(matches!(result, Err(ProviderError::Network(_))));
    }
}
