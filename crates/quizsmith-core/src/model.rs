//! Core data model types for quizsmith.
//!
//! These are the fundamental types that the entire quizsmith system uses
//! to represent generated tests, questions, and result records.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single answer option within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Option letter ("A" through "D").
    pub id: String,
    /// Option text.
    pub text: String,
}

/// A multiple-choice question extracted from generated test content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question number as declared in the source text; unique within a test.
    pub id: u32,
    /// The question prompt.
    pub text: String,
    /// Ordered options, deduplicated by letter.
    pub options: Vec<AnswerOption>,
    /// The correct option's letter. Always a member of `options`.
    pub correct_answer: String,
    /// Optional explanation shown after an incorrect answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Look up an option by its letter.
    pub fn option(&self, id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// Difficulty level requested for generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" | "easy" => Ok(Difficulty::Beginner),
            "intermediate" | "medium" => Ok(Difficulty::Intermediate),
            "advanced" | "hard" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Caller-supplied parameters for test generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestParams {
    /// Subject area, e.g. "Linear Algebra".
    pub subject_area: String,
    /// Optional comma-separated focus topics.
    #[serde(default)]
    pub topics: Option<String>,
    /// Requested difficulty level.
    pub difficulty: Difficulty,
}

/// A generated test: parsed questions plus caller metadata.
///
/// Immutable once created; retaking a test re-reads the same record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    /// Title taken from the leading line of the completion.
    pub title: String,
    /// Short description preceding the first question.
    pub description: String,
    /// The parsed questions, in declaration order. Never empty.
    pub questions: Vec<Question>,
    /// Subject area the test was generated for.
    pub subject_area: String,
    /// Difficulty the test was generated at.
    pub difficulty: Difficulty,
    /// Comma-separated focus topics, if the caller supplied any.
    #[serde(default)]
    pub topics: Option<String>,
    /// The original unparsed completion, retained for audit.
    pub raw_content: String,
}

impl Test {
    /// Explicit topics split into trimmed, lowercased labels.
    pub fn topic_labels(&self) -> Vec<String> {
        self.topics
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// A test as persisted by a store, with server-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTest {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// When the test was persisted.
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub test: Test,
}

/// The outcome of one completed test session.
///
/// Created exactly once per session and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// The test this result was scored against.
    pub test_id: Uuid,
    /// Count of correctly answered questions.
    pub score: u32,
    /// Number of questions in the test.
    pub total_questions: u32,
    /// Seconds consumed out of the session's time budget.
    pub time_taken_secs: u64,
    /// Snapshot of the session's answers, question id to selected option.
    pub answers: HashMap<u32, String>,
    /// Up to three topics inferred to need further study, worst first.
    pub weak_topics: Vec<String>,
}

impl TestResult {
    /// Score as a percentage of the total.
    pub fn percent(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.score as f64 / self.total_questions as f64 * 100.0
        }
    }
}

/// A result record as persisted by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTestResult {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// When the result was persisted.
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: TestResult,
}
