//! The `quizsmith results` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use uuid::Uuid;

use quizsmith_core::traits::ResultStore;
use quizsmith_providers::config::load_config_from;
use quizsmith_store::{history, JsonStore};

use super::format_time;

pub async fn execute(
    test_id: Option<Uuid>,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = JsonStore::new(data_dir.unwrap_or_else(|| config.data_dir.clone()));

    let results = store.list_results(test_id).await?;
    if results.is_empty() {
        println!("No results recorded yet. Take a test with `quizsmith take <id>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Test", "Score", "%", "Time", "Weak topics", "Taken"]);

    for stored in &results {
        let result = &stored.result;
        table.add_row(vec![
            Cell::new(result.test_id),
            Cell::new(format!("{}/{}", result.score, result.total_questions)),
            Cell::new(format!("{:.0}", result.percent())),
            Cell::new(format_time(result.time_taken_secs)),
            Cell::new(result.weak_topics.join(", ")),
            Cell::new(stored.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");

    // Progress summary only makes sense for a single test's history.
    if test_id.is_some() {
        let summary = history::summarize(&results);
        println!(
            "\n{} attempts, best {}/{}, mean {:.0}%",
            summary.attempts, summary.best_score, summary.total_questions, summary.mean_percent,
        );
        if !summary.recurring_weak_topics.is_empty() {
            println!(
                "Keeps coming up: {}",
                summary.recurring_weak_topics.join(", ")
            );
        }
    }

    Ok(())
}
