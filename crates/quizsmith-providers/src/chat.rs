//! OpenAI-compatible chat-completions provider.
//!
//! One wire format covers both Groq (the default backend) and OpenAI
//! itself; only the base URL, credentials, and model catalog differ.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizsmith_core::error::ProviderError;
use quizsmith_core::traits::{
    CompletionProvider, CompletionRequest, CompletionResponse, ModelInfo, TokenUsage,
};

const GROQ_BASE_URL: &str = "https://api.groq.com/openai";
const OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A provider speaking the OpenAI chat-completions wire format.
pub struct ChatApiProvider {
    name: &'static str,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl ChatApiProvider {
    /// Provider against the Groq API (or a compatible override).
    pub fn groq(api_key: &str, base_url: Option<String>) -> Self {
        Self::new("groq", api_key, base_url.unwrap_or_else(|| GROQ_BASE_URL.to_string()))
    }

    /// Provider against the OpenAI API (or a compatible override).
    pub fn openai(api_key: &str, base_url: Option<String>) -> Self {
        Self::new(
            "openai",
            api_key,
            base_url.unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
        )
    }

    fn new(name: &'static str, api_key: &str, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            name,
            api_key: api_key.to_string(),
            base_url,
            client,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: ChatUsage,
    model: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize, Default)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ChatError {
    error: ChatErrorBody,
}

#[derive(Deserialize)]
struct ChatErrorBody {
    message: String,
}

#[async_trait]
impl CompletionProvider for ChatApiProvider {
    fn name(&self) -> &str {
        self.name
    }

    #[instrument(skip(self, request), fields(provider = self.name, model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        let start = Instant::now();

        let body = ChatRequest {
            model: request.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.prompt.clone(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(ProviderError::ModelNotFound(request.model.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ChatError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::ApiError { status, message }.into());
        }

        let api_response: ChatResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let content = api_response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: api_response.model,
            token_usage: TokenUsage {
                prompt_tokens: api_response.usage.prompt_tokens,
                completion_tokens: api_response.usage.completion_tokens,
                total_tokens: api_response.usage.total_tokens,
            },
            latency_ms,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        match self.name {
            "groq" => vec![
                ModelInfo {
                    id: "llama3-70b-8192".into(),
                    name: "LLaMA 3 70B".into(),
                    provider: "groq".into(),
                    max_context: 8_192,
                },
                ModelInfo {
                    id: "llama3-8b-8192".into(),
                    name: "LLaMA 3 8B".into(),
                    provider: "groq".into(),
                    max_context: 8_192,
                },
                ModelInfo {
                    id: "mixtral-8x7b-32768".into(),
                    name: "Mixtral 8x7B".into(),
                    provider: "groq".into(),
                    max_context: 32_768,
                },
            ],
            _ => vec![
                ModelInfo {
                    id: "gpt-4.1".into(),
                    name: "GPT-4.1".into(),
                    provider: "openai".into(),
                    max_context: 1_000_000,
                },
                ModelInfo {
                    id: "gpt-4.1-mini".into(),
                    name: "GPT-4.1 Mini".into(),
                    provider: "openai".into(),
                    max_context: 1_000_000,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_request() -> CompletionRequest {
        CompletionRequest {
            model: "llama3-70b-8192".into(),
            system_prompt: "You are a test creator.".into(),
            prompt: "Create a test about algebra".into(),
            max_tokens: 4000,
            temperature: 0.5,
        }
    }

    #[tokio::test]
    async fn successful_completion() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"content": "  Algebra Test\n\n1. Solve x\nA. 1\nB. 2  ", "role": "assistant"}, "index": 0}],
            "model": "llama3-70b-8192",
            "usage": {"prompt_tokens": 120, "completion_tokens": 80, "total_tokens": 200}
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let provider = ChatApiProvider::groq("test-key", Some(server.uri()));
        let response = provider.complete(&make_request()).await.unwrap();

        assert!(response.content.starts_with("Algebra Test"));
        assert!(!response.content.ends_with(' '), "content should be trimmed");
        assert_eq!(response.token_usage.total_tokens, 200);
        assert_eq!(response.model, "llama3-70b-8192");
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let provider = ChatApiProvider::groq("bad-key", Some(server.uri()));
        let err = provider.complete(&make_request()).await.unwrap_err();

        let provider_err = err.downcast_ref::<ProviderError>().unwrap();
        assert!(provider_err.is_permanent());
    }

    #[tokio::test]
    async fn rate_limiting_carries_retry_after() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let provider = ChatApiProvider::groq("test-key", Some(server.uri()));
        let err = provider.complete(&make_request()).await.unwrap_err();

        let provider_err = err.downcast_ref::<ProviderError>().unwrap();
        assert_eq!(provider_err.retry_after_ms(), Some(7000));
    }

    #[tokio::test]
    async fn unknown_model_is_permanent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = ChatApiProvider::groq("test-key", Some(server.uri()));
        let err = provider.complete(&make_request()).await.unwrap_err();
        assert!(err.to_string().contains("model not found"));
    }

    #[tokio::test]
    async fn api_error_body_is_unwrapped() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"message": "context length exceeded", "type": "invalid_request_error"}
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let provider = ChatApiProvider::groq("test-key", Some(server.uri()));
        let err = provider.complete(&make_request()).await.unwrap_err();
        assert!(err.to_string().contains("context length exceeded"));
    }

    #[test]
    fn model_catalogs_differ_per_backend() {
        let groq = ChatApiProvider::groq("k", None);
        assert!(groq.available_models().iter().any(|m| m.id == "llama3-70b-8192"));

        let openai = ChatApiProvider::openai("k", None);
        assert!(openai.available_models().iter().all(|m| m.provider == "openai"));
    }
}
