//! Integration tests for `GeminiClient` against a mock HTTP server.
//!
//! External interactions: mockito stands in for the Gemini API; no real network.

use gemini_client::{GeminiClient, GenerativeModel};

fn candidates_body(text: &str) -> String {
    format!(
        r#"{{"candidates": [{{"content": {{"parts": [{{"text": "{text}"}}]}}}}]}}"#
    )
}

/// **Test: generate() posts to models/{model}:generateContent and returns the
/// first candidate's text.**
#[tokio::test]
async fn generate_returns_candidate_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-pro:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidates_body("hello from gemini"))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string()).with_base_url(server.url());
    let reply = client.generate("hi").await.unwrap();

    assert_eq!(reply, "hello from gemini");
    mock.assert_async().await;
}

/// **Test: the request body carries the prompt and the fixed generation
/// config.**
#[tokio::test]
async fn generate_sends_prompt_and_generation_config() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-pro:generateContent")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::PartialJson(serde_json::json!({
                "contents": [{"parts": [{"text": "summarize this"}]}]
            })),
            mockito::Matcher::PartialJson(serde_json::json!({
                "generationConfig": {"topK": 32, "maxOutputTokens": 8192}
            })),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidates_body("ok"))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string()).with_base_url(server.url());
    client.generate("summarize this").await.unwrap();

    mock.assert_async().await;
}

/// **Test: generate_with_image() targets the vision model and inlines the
/// image as base64 data.**
#[tokio::test]
async fn generate_with_image_uses_vision_model() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-pro-vision:generateContent")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "contents": [{"parts": [
                {"text": "describe"},
                {"inlineData": {"mimeType": "image/png", "data": "AQID"}}
            ]}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidates_body("a picture"))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string()).with_base_url(server.url());
    let reply = client
        .generate_with_image("describe", "image/png", &[1, 2, 3])
        .await
        .unwrap();

    assert_eq!(reply, "a picture");
    mock.assert_async().await;
}

/// **Test: a non-success status surfaces as an error carrying the body.**
#[tokio::test]
async fn generate_propagates_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-pro:generateContent")
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string()).with_base_url(server.url());
    let err = client.generate("hi").await.unwrap_err();

    assert!(err.to_string().contains("quota exceeded"));
}

/// **Test: an empty candidate list is an error, not an empty reply.**
#[tokio::test]
async fn generate_rejects_empty_candidates() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-pro:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string()).with_base_url(server.url());
    assert!(client.generate("hi").await.is_err());
}
