pub mod generate;
pub mod init;
pub mod list;
pub mod list_models;
pub mod pathway;
pub mod results;
pub mod take;

use quizsmith_providers::QuizsmithConfig;

/// Resolve a `provider/model` override against the configured defaults.
/// A bare model name uses the default provider.
pub(crate) fn resolve_model(config: &QuizsmithConfig, spec: Option<&str>) -> (String, String) {
    match spec {
        Some(s) => match s.split_once('/') {
            Some((provider, model)) => (provider.to_string(), model.to_string()),
            None => (config.default_provider.clone(), s.to_string()),
        },
        None => (
            config.default_provider.clone(),
            config.default_model.clone(),
        ),
    }
}

/// Format a number of seconds as MM:SS.
pub(crate) fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_model_variants() {
        let config = QuizsmithConfig::default();
        assert_eq!(
            resolve_model(&config, Some("openai/gpt-4.1")),
            ("openai".to_string(), "gpt-4.1".to_string())
        );
        assert_eq!(
            resolve_model(&config, Some("llama3-8b-8192")),
            ("groq".to_string(), "llama3-8b-8192".to_string())
        );
        assert_eq!(
            resolve_model(&config, None),
            ("groq".to_string(), "llama3-70b-8192".to_string())
        );
    }

    #[test]
    fn format_time_pads() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(2700), "45:00");
    }
}
