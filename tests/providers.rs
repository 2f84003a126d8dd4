//! HTTP client integration tests over a local mock server.

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rat_chain::{
    CLAUDE_ERROR_RESPONSE, ChainConfig, ChainError, ClaudeChain, OpenRouterChain, Role,
};

const DEEPSEEK_SSE: &str = concat!(
    "data: {\"choices\":[{\"delta\":{\"reasoning_content\":\"Let's \",\"content\":null}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"reasoning_content\":\"compute.\",\"content\":null}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"reasoning_content\":null,\"content\":\"ignored\"}}]}\n\n",
    "data: [DONE]\n\n",
);

const OPENROUTER_SSE: &str = concat!(
    "data: {\"id\":\"gen-1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"4\"},\"finish_reason\":null}]}\n\n",
    "data: {\"id\":\"gen-1\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
    "data: [DONE]\n\n",
);

const ANTHROPIC_SSE: &str = concat!(
    "event: message_start\n",
    "data: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_1\"}}\n\n",
    "event: content_block_delta\n",
    "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"Mock \"}}\n\n",
    "event: content_block_delta\n",
    "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"response\"}}\n\n",
    "event: message_stop\n",
    "data: {\"type\":\"message_stop\"}\n\n",
);

async fn mock_deepseek() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-ds"))
        .and(body_partial_json(serde_json::json!({"stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DEEPSEEK_SSE, "text/event-stream"))
        .mount(&server)
        .await;
    server
}

fn config_for(deepseek: &MockServer) -> ChainConfig {
    let mut config = ChainConfig::default()
        .with_deepseek_key("sk-ds")
        .with_openrouter_key("sk-or")
        .with_anthropic_key("sk-ant");
    config.deepseek_base_url = deepseek.uri();
    config
}

#[tokio::test]
async fn test_openrouter_chain_over_http() {
    let deepseek = mock_deepseek().await;
    let openrouter = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-or"))
        .and(header("x-title", "rat-chain"))
        .and(body_partial_json(
            serde_json::json!({"model": "openai/gpt-4o-mini", "stream": true}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(OPENROUTER_SSE, "text/event-stream"))
        .mount(&openrouter)
        .await;

    let mut config = config_for(&deepseek);
    config.openrouter_base_url = openrouter.uri();

    let mut chain = OpenRouterChain::from_config(&config).unwrap();
    let outcome = chain.run("What is 2+2?").await.unwrap();

    assert_eq!(outcome.reasoning, "Let's compute.");
    assert_eq!(outcome.response, "4");
    assert_eq!(chain.reasoning_history().len(), 1);
    assert_eq!(chain.response_history().len(), 2);
}

#[tokio::test]
async fn test_claude_chain_over_http() {
    let deepseek = mock_deepseek().await;
    let anthropic = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({"stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ANTHROPIC_SSE, "text/event-stream"))
        .mount(&anthropic)
        .await;

    let mut config = config_for(&deepseek);
    config.anthropic_base_url = anthropic.uri();

    let mut chain = ClaudeChain::from_config(&config).unwrap();
    let outcome = chain.run("test input").await.unwrap();

    assert_eq!(outcome.reasoning, "Let's compute.");
    assert_eq!(outcome.response, "Mock response");

    // Wire-native history shape on the Claude side.
    let history = chain.response_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, Role::Assistant);
}

#[tokio::test]
async fn test_reasoning_auth_failure_propagates() {
    let deepseek = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&deepseek)
        .await;

    let mut config = config_for(&deepseek);
    config.openrouter_base_url = deepseek.uri(); // never reached

    let mut chain = OpenRouterChain::from_config(&config).unwrap();
    let err = chain.run("q").await.unwrap_err();
    assert!(matches!(
        err,
        ChainError::Authentication {
            provider: "deepseek",
            ..
        }
    ));
}

#[tokio::test]
async fn test_openrouter_rate_limit_propagates() {
    let deepseek = mock_deepseek().await;
    let openrouter = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&openrouter)
        .await;

    let mut config = config_for(&deepseek);
    config.openrouter_base_url = openrouter.uri();

    let mut chain = OpenRouterChain::from_config(&config).unwrap();
    let err = chain.run("q").await.unwrap_err();
    assert!(matches!(
        err,
        ChainError::RateLimit {
            provider: "openrouter",
            ..
        }
    ));

    // The enveloped user turn is already in history; no assistant followed.
    assert_eq!(chain.response_history().len(), 1);
}

#[tokio::test]
async fn test_claude_http_failure_is_contained() {
    let deepseek = mock_deepseek().await;
    let anthropic = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&anthropic)
        .await;

    let mut config = config_for(&deepseek);
    config.anthropic_base_url = anthropic.uri();

    let mut chain = ClaudeChain::from_config(&config).unwrap();
    let outcome = chain.run("q").await.unwrap();

    assert_eq!(outcome.response, CLAUDE_ERROR_RESPONSE);
    assert_eq!(chain.response_history().len(), 1);
}

#[tokio::test]
async fn test_anthropic_error_event_is_contained() {
    let deepseek = mock_deepseek().await;
    let anthropic = MockServer::start().await;
    let body = concat!(
        "event: content_block_delta\n",
        "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"partial\"}}\n\n",
        "event: error\n",
        "data: {\"type\":\"error\",\"error\":{\"type\":\"overloaded_error\",\"message\":\"Overloaded\"}}\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&anthropic)
        .await;

    let mut config = config_for(&deepseek);
    config.anthropic_base_url = anthropic.uri();

    let mut chain = ClaudeChain::from_config(&config).unwrap();
    let outcome = chain.run("q").await.unwrap();
    assert_eq!(outcome.response, CLAUDE_ERROR_RESPONSE);
}
