//! The `quizsmith list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizsmith_core::traits::TestStore;
use quizsmith_providers::config::load_config_from;
use quizsmith_store::JsonStore;

pub async fn execute(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = JsonStore::new(data_dir.unwrap_or_else(|| config.data_dir.clone()));

    let tests = store.list_tests().await?;
    if tests.is_empty() {
        println!("No stored tests. Create one with `quizsmith generate`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Id",
        "Title",
        "Subject",
        "Difficulty",
        "Questions",
        "Created",
    ]);

    for stored in &tests {
        table.add_row(vec![
            Cell::new(stored.id),
            Cell::new(&stored.test.title),
            Cell::new(&stored.test.subject_area),
            Cell::new(stored.test.difficulty),
            Cell::new(stored.test.questions.len()),
            Cell::new(stored.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    Ok(())
}
