//! The `quizsmith pathway` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use quizsmith_core::generator::{self, GeneratorConfig};
use quizsmith_core::model::Difficulty;
use quizsmith_core::pathway::PathwayParams;
use quizsmith_providers::config::load_config_from;
use quizsmith_providers::create_provider;

use super::resolve_model;

pub async fn execute(
    goal: String,
    level: String,
    hours: String,
    methods: Vec<String>,
    model_spec: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let level: Difficulty = level.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let (provider_name, model) = resolve_model(&config, model_spec.as_deref());
    let provider_config = config.providers.get(&provider_name).ok_or_else(|| {
        anyhow::anyhow!(
            "provider '{provider_name}' not found in config. Run `quizsmith init` and set an API key."
        )
    })?;
    let provider = create_provider(provider_config)?;

    eprintln!("Designing a learning pathway for \"{goal}\"...");

    let params = PathwayParams {
        goal,
        level,
        hours_per_week: hours,
        methods,
    };
    let generator_config = GeneratorConfig {
        max_retries: config.max_retries,
        retry_delay: Duration::from_millis(config.retry_delay_ms),
        temperature: config.default_temperature,
    };

    let pathway =
        generator::generate_pathway(provider.as_ref(), &model, &params, &generator_config).await?;

    for week in &pathway.weeks {
        println!("Week {}:", week.number);
        for item in &week.items {
            println!("  - {item}");
        }
        println!();
    }

    Ok(())
}
