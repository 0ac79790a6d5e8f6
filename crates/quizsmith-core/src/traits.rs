//! Core trait definitions for LLM completion providers and stores.
//!
//! These async traits are implemented by the `quizsmith-providers` and
//! `quizsmith-store` crates respectively.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{StoredTest, StoredTestResult, Test, TestResult};

// ---------------------------------------------------------------------------
// Completion provider trait
// ---------------------------------------------------------------------------

/// Trait for LLM backends that produce free-text completions.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g. "groq").
    fn name(&self) -> &str;

    /// Run one chat completion.
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse>;

    /// List models this provider can serve.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request for a chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (e.g. "llama3-70b-8192").
    pub model: String,
    /// System prompt framing the assistant's role.
    pub system_prompt: String,
    /// The user prompt.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response from a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The completion text, trimmed.
    pub content: String,
    /// Model that actually served the request.
    pub model: String,
    /// Token usage as reported by the API.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting for one completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}

// ---------------------------------------------------------------------------
// Store traits
// ---------------------------------------------------------------------------

/// Persistence for generated tests.
#[async_trait]
pub trait TestStore: Send + Sync {
    /// Persist a test and return it with its server-assigned identity.
    async fn save_test(&self, test: &Test) -> anyhow::Result<StoredTest>;

    /// Fetch a test by id. Fails if no such test exists.
    async fn get_test(&self, id: Uuid) -> anyhow::Result<StoredTest>;

    /// List all stored tests, newest first.
    async fn list_tests(&self) -> anyhow::Result<Vec<StoredTest>>;
}

/// Persistence for completed-session results.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Append a result record and return it with its server-assigned identity.
    async fn save_result(&self, result: &TestResult) -> anyhow::Result<StoredTestResult>;

    /// List stored results, optionally restricted to one test, newest first.
    async fn list_results(&self, test_id: Option<Uuid>) -> anyhow::Result<Vec<StoredTestResult>>;
}
