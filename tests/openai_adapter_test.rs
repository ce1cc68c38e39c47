//! Integration tests for the OpenAI-compatible HTTP adapters
//!
//! All tests run against a local mock server.
//!
//! Test coverage:
//! - Embedding and chat-completion success paths
//! - Retry on transient statuses (429, 500)
//! - No retry on permanent statuses (400, 401)
//! - Retries exhausted
//! - Malformed or incomplete response bodies

use mockito::{Matcher, Server};
use support_rag::domain::models::config::{EmbeddingConfig, GenerationConfig, RetryConfig};
use support_rag::{CompletionRequest, Embedder, Generator, OpenAiEmbedder, OpenAiGenerator, RagError};

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 3,
        initial_backoff_ms: 1,
        max_backoff_ms: 10,
    }
}

fn embedder_for(server: &Server) -> OpenAiEmbedder {
    let config = EmbeddingConfig {
        model: "test-embedding-model".to_string(),
        dimension: 3,
        base_url: server.url(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    };
    OpenAiEmbedder::new(&config, &fast_retry()).expect("Failed to create embedder")
}

fn generator_for(server: &Server) -> OpenAiGenerator {
    let config = GenerationConfig {
        model: "test-chat-model".to_string(),
        base_url: server.url(),
        api_key: Some("test-key".to_string()),
        ..GenerationConfig::default()
    };
    OpenAiGenerator::new(&config, &fast_retry()).expect("Failed to create generator")
}

fn embedding_body(vector: &[f32]) -> String {
    serde_json::json!({
        "object": "list",
        "data": [{"object": "embedding", "index": 0, "embedding": vector}],
        "model": "test-embedding-model",
        "usage": {"prompt_tokens": 4, "total_tokens": 4}
    })
    .to_string()
}

fn chat_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn completion_request() -> CompletionRequest {
    CompletionRequest {
        system: "Answer from the guide.".to_string(),
        user: "How do I reset my password?".to_string(),
        temperature: 0.5,
        max_tokens: 800,
    }
}

#[tokio::test]
async fn test_embed_success_with_mock() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "test-embedding-model",
            "input": ["reset password"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(embedding_body(&[0.1, 0.2, 0.3]))
        .create_async()
        .await;

    let vector = embedder_for(&server).embed("reset password").await.unwrap();

    assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_embed_retries_on_429() {
    let mut server = Server::new_async().await;
    let limited = server
        .mock("POST", "/embeddings")
        .with_status(429)
        .with_body(r#"{"error":{"message":"slow down"}}"#)
        .expect(1)
        .create_async()
        .await;
    let ok = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_body(embedding_body(&[1.0, 0.0, 0.0]))
        .expect(1)
        .create_async()
        .await;

    let vector = embedder_for(&server).embed("vpn").await.unwrap();

    assert_eq!(vector, vec![1.0, 0.0, 0.0]);
    limited.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
async fn test_embed_retries_on_500() {
    let mut server = Server::new_async().await;
    let failed = server
        .mock("POST", "/embeddings")
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create_async()
        .await;
    let ok = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_body(embedding_body(&[0.0, 1.0, 0.0]))
        .expect(1)
        .create_async()
        .await;

    assert!(embedder_for(&server).embed("vpn").await.is_ok());
    failed.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
async fn test_embed_401_no_retry() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .expect(1) // Should only be called once
        .create_async()
        .await;

    let err = embedder_for(&server).embed("vpn").await.unwrap_err();

    assert!(matches!(err, RagError::EmbeddingFailure(_)));
    assert!(err.to_string().contains("Authentication failed"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_embed_max_retries_exhausted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .with_status(429)
        .expect(4) // Initial attempt + 3 retries
        .create_async()
        .await;

    let err = embedder_for(&server).embed("vpn").await.unwrap_err();

    assert!(matches!(err, RagError::EmbeddingFailure(_)));
    assert!(err.to_string().contains("Rate limit"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_embed_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = embedder_for(&server).embed("vpn").await.unwrap_err();
    assert!(matches!(err, RagError::EmbeddingFailure(_)));
    assert!(err.to_string().contains("Invalid response"));
}

#[tokio::test]
async fn test_embed_wrong_dimension() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_body(embedding_body(&[0.1, 0.2]))
        .create_async()
        .await;

    let err = embedder_for(&server).embed("vpn").await.unwrap_err();
    assert!(err.to_string().contains("expected 3 dimensions, got 2"));
}

#[tokio::test]
async fn test_complete_success_with_mock() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "test-chat-model",
            "max_tokens": 800,
            "messages": [
                {"role": "system", "content": "Answer from the guide."},
                {"role": "user", "content": "How do I reset my password?"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body("  Use the self-service portal.\n"))
        .create_async()
        .await;

    let text = generator_for(&server)
        .complete(&completion_request())
        .await
        .unwrap();

    assert_eq!(text, "Use the self-service portal.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_complete_400_no_retry() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(400)
        .with_body(r#"{"error":{"message":"context length exceeded"}}"#)
        .expect(1)
        .create_async()
        .await;

    let err = generator_for(&server)
        .complete(&completion_request())
        .await
        .unwrap_err();

    assert!(matches!(err, RagError::GenerationFailure(_)));
    assert!(err.to_string().contains("context length exceeded"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_complete_empty_content_is_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(chat_body("   "))
        .create_async()
        .await;

    let err = generator_for(&server)
        .complete(&completion_request())
        .await
        .unwrap_err();
    assert!(matches!(err, RagError::GenerationFailure(_)));
    assert!(err.to_string().contains("empty completion"));
}

#[tokio::test]
async fn test_complete_no_choices_is_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let err = generator_for(&server)
        .complete(&completion_request())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no choices returned"));
}

#[tokio::test]
async fn test_unreachable_server_is_embedding_failure() {
    let config = EmbeddingConfig {
        dimension: 3,
        base_url: "http://127.0.0.1:9".to_string(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 1,
        ..EmbeddingConfig::default()
    };
    let retry = RetryConfig {
        max_retries: 0,
        ..fast_retry()
    };
    let embedder = OpenAiEmbedder::new(&config, &retry).unwrap();

    assert!(matches!(
        embedder.embed("vpn").await,
        Err(RagError::EmbeddingFailure(_))
    ));
}
