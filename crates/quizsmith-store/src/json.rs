//! JSON file store.
//!
//! Tests and results live under the data directory as one pretty-printed
//! JSON file per record, named by the record's UUID:
//!
//! ```text
//! <root>/tests/<uuid>.json
//! <root>/results/<uuid>.json
//! ```
//!
//! Tests are immutable once written; results are append-only.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use quizsmith_core::model::{StoredTest, StoredTestResult, Test, TestResult};
use quizsmith_core::traits::{ResultStore, TestStore};

/// Store-level failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested test does not exist. Terminal for a session.
    #[error("test not found: {0}")]
    TestNotFound(Uuid),
}

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tests_dir(&self) -> PathBuf {
        self.root.join("tests")
    }

    fn results_dir(&self) -> PathBuf {
        self.root.join("results")
    }

    fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("failed to serialize record")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write record to {}", path.display()))?;
        Ok(())
    }

    /// Read every `.json` record in a directory, skipping files that fail
    /// to parse (a corrupt record should not hide the rest).
    fn read_records<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
        let mut records = Vec::new();
        if !dir.is_dir() {
            return Ok(records);
        }
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to read directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let parsed = std::fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|content| serde_json::from_str(&content).map_err(Into::into));
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl TestStore for JsonStore {
    async fn save_test(&self, test: &Test) -> Result<StoredTest> {
        let stored = StoredTest {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            test: test.clone(),
        };
        let path = self.tests_dir().join(format!("{}.json", stored.id));
        Self::write_json(&path, &stored)?;
        Ok(stored)
    }

    async fn get_test(&self, id: Uuid) -> Result<StoredTest> {
        let path = self.tests_dir().join(format!("{id}.json"));
        if !path.exists() {
            return Err(StoreError::TestNotFound(id).into());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read test from {}", path.display()))?;
        let stored = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse test at {}", path.display()))?;
        Ok(stored)
    }

    async fn list_tests(&self) -> Result<Vec<StoredTest>> {
        let mut tests: Vec<StoredTest> = Self::read_records(&self.tests_dir())?;
        tests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tests)
    }
}

#[async_trait]
impl ResultStore for JsonStore {
    async fn save_result(&self, result: &TestResult) -> Result<StoredTestResult> {
        let stored = StoredTestResult {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            result: result.clone(),
        };
        let path = self.results_dir().join(format!("{}.json", stored.id));
        Self::write_json(&path, &stored)?;
        Ok(stored)
    }

    async fn list_results(&self, test_id: Option<Uuid>) -> Result<Vec<StoredTestResult>> {
        let mut results: Vec<StoredTestResult> = Self::read_records(&self.results_dir())?;
        if let Some(test_id) = test_id {
            results.retain(|r| r.result.test_id == test_id);
        }
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizsmith_core::model::{AnswerOption, Difficulty, Question};
    use std::collections::HashMap;

    fn make_test(title: &str) -> Test {
        Test {
            title: title.into(),
            description: "A stored fixture.".into(),
            questions: vec![Question {
                id: 1,
                text: "Pick one".into(),
                options: vec![
                    AnswerOption {
                        id: "A".into(),
                        text: "yes".into(),
                    },
                    AnswerOption {
                        id: "B".into(),
                        text: "no".into(),
                    },
                ],
                correct_answer: "A".into(),
                explanation: None,
            }],
            subject_area: "Math".into(),
            difficulty: Difficulty::Beginner,
            topics: None,
            raw_content: "raw".into(),
        }
    }

    fn make_result(test_id: Uuid, score: u32) -> TestResult {
        TestResult {
            test_id,
            score,
            total_questions: 1,
            time_taken_secs: 30,
            answers: HashMap::from([(1, "A".to_string())]),
            weak_topics: vec![],
        }
    }

    #[tokio::test]
    async fn save_and_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let stored = store.save_test(&make_test("Roundtrip")).await.unwrap();
        let fetched = store.get_test(stored.id).await.unwrap();

        assert_eq!(fetched, stored);
        assert_eq!(fetched.test.title, "Roundtrip");
    }

    #[tokio::test]
    async fn get_missing_test_fails_with_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let err = store.get_test(Uuid::new_v4()).await.unwrap_err();
        assert!(err.downcast_ref::<StoreError>().is_some());
        assert!(err.to_string().contains("test not found"));
    }

    #[tokio::test]
    async fn list_tests_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let first = store.save_test(&make_test("first")).await.unwrap();
        let second = store.save_test(&make_test("second")).await.unwrap();

        let tests = store.list_tests().await.unwrap();
        assert_eq!(tests.len(), 2);
        assert!(tests[0].created_at >= tests[1].created_at);
        let ids: Vec<Uuid> = tests.iter().map(|t| t.id).collect();
        assert!(ids.contains(&first.id) && ids.contains(&second.id));
    }

    #[tokio::test]
    async fn list_results_filters_by_test() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let test_a = Uuid::new_v4();
        let test_b = Uuid::new_v4();
        store.save_result(&make_result(test_a, 1)).await.unwrap();
        store.save_result(&make_result(test_b, 0)).await.unwrap();
        store.save_result(&make_result(test_a, 0)).await.unwrap();

        let all = store.list_results(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let for_a = store.list_results(Some(test_a)).await.unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|r| r.result.test_id == test_a));
    }

    #[tokio::test]
    async fn corrupt_record_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        store.save_test(&make_test("good")).await.unwrap();
        std::fs::write(dir.path().join("tests").join("bad.json"), "{not json").unwrap();

        let tests = store.list_tests().await.unwrap();
        assert_eq!(tests.len(), 1);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        assert!(store.list_tests().await.unwrap().is_empty());
        assert!(store.list_results(None).await.unwrap().is_empty());
    }
}
