//! quizsmith-providers — LLM provider integrations.
//!
//! Implements the [`quizsmith_core::traits::CompletionProvider`] trait for
//! the chat-completion backends quizsmith generates content with.

pub mod chat;
pub mod config;
pub mod mock;

pub use config::{create_provider, load_config, load_config_from, ProviderConfig, QuizsmithConfig};
