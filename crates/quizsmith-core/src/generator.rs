//! Generation orchestration.
//!
//! Builds the prompt, calls the configured provider with retries on
//! transient failures, and parses the completion into structured content.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::model::{Test, TestParams};
use crate::parser;
use crate::pathway::{self, LearningPathway, PathwayParams};
use crate::prompt;
use crate::traits::{CompletionProvider, CompletionRequest, CompletionResponse};

/// Tuning knobs for generation requests.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Retries on provider errors (not parse failures).
    pub max_retries: u32,
    /// Initial delay between retries; doubles per attempt, capped at 60s.
    pub retry_delay: Duration,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            temperature: 0.5,
        }
    }
}

/// Generate, parse, and assemble a complete test.
///
/// Parse failure is terminal for the attempt and is surfaced to the
/// caller as "regenerate the test"; no provider retry can fix it.
pub async fn generate_test(
    provider: &dyn CompletionProvider,
    model: &str,
    params: &TestParams,
    config: &GeneratorConfig,
) -> Result<Test> {
    let request = CompletionRequest {
        model: model.to_string(),
        system_prompt: prompt::TEST_SYSTEM_PROMPT.to_string(),
        prompt: prompt::build_test_prompt(params),
        max_tokens: prompt::TEST_MAX_TOKENS,
        temperature: config.temperature,
    };

    let response = complete_with_retries(provider, &request, config).await?;
    let parsed = parser::parse_test_content(&response.content)?;

    Ok(Test {
        title: parsed.title,
        description: parsed.description,
        questions: parsed.questions,
        subject_area: params.subject_area.clone(),
        difficulty: params.difficulty,
        topics: params.topics.clone(),
        raw_content: parsed.raw_content,
    })
}

/// Generate and parse a learning pathway.
pub async fn generate_pathway(
    provider: &dyn CompletionProvider,
    model: &str,
    params: &PathwayParams,
    config: &GeneratorConfig,
) -> Result<LearningPathway> {
    let request = CompletionRequest {
        model: model.to_string(),
        system_prompt: prompt::PATHWAY_SYSTEM_PROMPT.to_string(),
        prompt: prompt::build_pathway_prompt(params),
        max_tokens: prompt::PATHWAY_MAX_TOKENS,
        temperature: config.temperature,
    };

    let response = complete_with_retries(provider, &request, config).await?;
    Ok(pathway::parse_pathway(&response.content)?)
}

/// Call the provider, retrying transient errors with exponential backoff.
///
/// Permanent failures (bad key, unknown model) short-circuit; a
/// rate-limit retry-after hint overrides the backoff delay.
async fn complete_with_retries(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
    config: &GeneratorConfig,
) -> Result<CompletionResponse> {
    let mut last_error = None;
    let mut delay = config.retry_delay;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(Duration::from_secs(60));
        }

        match provider.complete(request).await {
            Ok(response) => {
                debug!(
                    model = %response.model,
                    latency_ms = response.latency_ms,
                    tokens = response.token_usage.total_tokens,
                    "completion received"
                );
                return Ok(response);
            }
            Err(e) => {
                match e.downcast_ref::<ProviderError>() {
                    Some(pe) if pe.is_permanent() => return Err(e),
                    Some(pe) => {
                        if let Some(ms) = pe.retry_after_ms() {
                            delay = Duration::from_millis(ms);
                        }
                        warn!(attempt, error = %pe, "transient provider error");
                    }
                    None => warn!(attempt, error = %e, "provider error"),
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("provider returned no response")))
}
