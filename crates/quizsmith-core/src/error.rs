//! Core error types.
//!
//! `ProviderError` is defined here rather than in `quizsmith-providers` so
//! the generation layer can downcast and classify provider failures for
//! retry decisions without string matching.

use thiserror::Error;

/// Errors from turning LLM completions into structured content.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// No usable questions were extracted after all parsing strategies.
    /// Terminal for the generation attempt; the caller should regenerate.
    #[error("no questions could be parsed from the generated test content")]
    NoQuestions,

    /// No weekly sections were found in a pathway completion.
    #[error("no weekly sections could be parsed from the generated pathway")]
    NoWeeks,
}

/// Errors constructing a test session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A test with no questions cannot be taken.
    #[error("test has no questions")]
    EmptyTest,
}

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_classification() {
        assert!(ProviderError::AuthenticationFailed("bad key".into()).is_permanent());
        assert!(ProviderError::ModelNotFound("no-such-model".into()).is_permanent());
        assert!(!ProviderError::RateLimited { retry_after_ms: 500 }.is_permanent());
        assert!(!ProviderError::NetworkError("reset".into()).is_permanent());
    }

    #[test]
    fn retry_after_hint() {
        let err = ProviderError::RateLimited {
            retry_after_ms: 5000,
        };
        assert_eq!(err.retry_after_ms(), Some(5000));
        assert_eq!(ProviderError::Timeout(30).retry_after_ms(), None);
    }
}
