/*!
 * Tests for provider implementations
 */

use msgwai::errors::ProviderError;
use msgwai::providers::Provider;
use msgwai::providers::anthropic::AnthropicRequest;
use msgwai::providers::mock::{MockBehavior, MockClient, MockRequest};
use msgwai::providers::openai::OpenAIRequest;

fn mock_request(user: &str) -> MockRequest {
    MockRequest {
        system: "You are a translation agent.".to_string(),
        user: user.to_string(),
    }
}

/// Test that the echo mock returns the user message unchanged
#[tokio::test]
async fn test_mock_complete_withEchoBehavior_shouldReturnInput() {
    let client = MockClient::new(MockBehavior::Echo);

    let response = client.complete(mock_request("{1}{}{Привет}")).await.unwrap();

    assert_eq!(response.text, "{1}{}{Привет}");
    assert_eq!(MockClient::extract_text(&response), "{1}{}{Привет}");
    assert_eq!(client.call_count(), 1);
}

/// Test that the fixed mock ignores the input
#[tokio::test]
async fn test_mock_complete_withFixedBehavior_shouldReturnScriptedText() {
    let client = MockClient::new(MockBehavior::Fixed("{1}{}{Hello}".to_string()));

    let response = client.complete(mock_request("anything")).await.unwrap();

    assert_eq!(response.text, "{1}{}{Hello}");
}

/// Test that the failing mock raises a request failure
#[tokio::test]
async fn test_mock_complete_withFailBehavior_shouldReturnRequestFailed() {
    let client = MockClient::new(MockBehavior::Fail("service down".to_string()));

    let result = client.complete(mock_request("anything")).await;

    assert!(matches!(result, Err(ProviderError::RequestFailed(message)) if message == "service down"));
    assert!(client.test_connection().await.is_err());
}

/// Test that the mock reports plausible token usage
#[tokio::test]
async fn test_mock_complete_withEchoBehavior_shouldReportUsage() {
    let client = MockClient::new(MockBehavior::Echo);

    let response = client.complete(mock_request("one two three")).await.unwrap();

    assert_eq!(response.completion_tokens, 3);
    assert!(response.prompt_tokens >= 3);
}

/// Test OpenAI request serialization shape
#[test]
fn test_openai_request_serialization_shouldMatchApiShape() {
    let request = OpenAIRequest::new("gpt-4")
        .add_message("system", "prompt")
        .add_message("user", "text")
        .temperature(0.0);

    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], "gpt-4");
    assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    assert_eq!(json["messages"][1]["role"], "user");
    assert_eq!(json["temperature"], 0.0);
    // Unset optional fields stay off the wire
    assert!(json.get("max_tokens").is_none());
}

/// Test Anthropic request serialization shape
#[test]
fn test_anthropic_request_serialization_shouldMatchApiShape() {
    let request = AnthropicRequest::new("claude-3-haiku-20240307", 4096)
        .system("prompt")
        .add_message("user", "text");

    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], "claude-3-haiku-20240307");
    assert_eq!(json["system"], "prompt");
    assert_eq!(json["max_tokens"], 4096);
    assert!(json.get("temperature").is_none());
}
