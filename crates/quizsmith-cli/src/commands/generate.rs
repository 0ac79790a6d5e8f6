//! The `quizsmith generate` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizsmith_core::generator::{self, GeneratorConfig};
use quizsmith_core::model::{Difficulty, TestParams};
use quizsmith_core::traits::TestStore;
use quizsmith_providers::config::load_config_from;
use quizsmith_providers::create_provider;
use quizsmith_store::JsonStore;

use super::resolve_model;

pub async fn execute(
    subject: String,
    topics: Option<String>,
    difficulty: String,
    model_spec: Option<String>,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let difficulty: Difficulty = difficulty.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let (provider_name, model) = resolve_model(&config, model_spec.as_deref());
    let provider_config = config.providers.get(&provider_name).ok_or_else(|| {
        anyhow::anyhow!(
            "provider '{provider_name}' not found in config. Run `quizsmith init` and set an API key."
        )
    })?;
    let provider = create_provider(provider_config)?;

    eprintln!("Generating a {difficulty} test on \"{subject}\" with {provider_name}/{model}...");

    let params = TestParams {
        subject_area: subject,
        topics,
        difficulty,
    };
    let generator_config = GeneratorConfig {
        max_retries: config.max_retries,
        retry_delay: Duration::from_millis(config.retry_delay_ms),
        temperature: config.default_temperature,
    };

    let test = generator::generate_test(provider.as_ref(), &model, &params, &generator_config)
        .await?;

    let store = JsonStore::new(data_dir.unwrap_or_else(|| config.data_dir.clone()));
    let stored = store.save_test(&test).await?;

    println!("{}", stored.test.title);
    println!("{}\n", stored.test.description);
    print_questions(&stored.test.questions);

    println!("\nSaved test {}", stored.id);
    println!("Take it with: quizsmith take {}", stored.id);

    Ok(())
}

fn print_questions(questions: &[quizsmith_core::model::Question]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Options"]);

    for question in questions {
        let mut text = question.text.clone();
        if text.chars().count() > 60 {
            text = text.chars().take(57).collect();
            text.push_str("...");
        }
        table.add_row(vec![
            Cell::new(question.id),
            Cell::new(text),
            Cell::new(question.options.len()),
        ]);
    }

    println!("{table}");
}
