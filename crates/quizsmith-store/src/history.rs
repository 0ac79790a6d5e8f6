//! Result-history aggregation.
//!
//! Rolls a test's stored results up into the progress view: attempt
//! count, best and latest scores, and the topics that keep recurring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quizsmith_core::model::StoredTestResult;

/// How many recurring weak topics the summary reports.
const MAX_SUMMARY_TOPICS: usize = 3;

/// Progress over repeated attempts at one test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Number of completed attempts.
    pub attempts: usize,
    /// Highest score across attempts.
    pub best_score: u32,
    /// Score of the most recent attempt.
    pub latest_score: u32,
    /// Question count of the most recent attempt.
    pub total_questions: u32,
    /// Mean score percentage across attempts.
    pub mean_percent: f64,
    /// When the test was last taken.
    pub last_taken: Option<DateTime<Utc>>,
    /// Topics that recur across attempts' weak spots, worst first.
    pub recurring_weak_topics: Vec<String>,
}

/// Summarize a set of results for one test.
///
/// Expects `results` newest first, as the store returns them. An empty
/// slice yields a zeroed summary rather than an error.
pub fn summarize(results: &[StoredTestResult]) -> ProgressSummary {
    let attempts = results.len();
    let latest = results.first();

    let best_score = results.iter().map(|r| r.result.score).max().unwrap_or(0);
    let mean_percent = if attempts == 0 {
        0.0
    } else {
        results.iter().map(|r| r.result.percent()).sum::<f64>() / attempts as f64
    };

    // Topic occurrence counts in first-encountered order, ties stable.
    let mut counts: Vec<(String, u32)> = Vec::new();
    for result in results {
        for topic in &result.result.weak_topics {
            if let Some(entry) = counts.iter_mut().find(|(t, _)| t == topic) {
                entry.1 += 1;
            } else {
                counts.push((topic.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(MAX_SUMMARY_TOPICS);

    ProgressSummary {
        attempts,
        best_score,
        latest_score: latest.map(|r| r.result.score).unwrap_or(0),
        total_questions: latest.map(|r| r.result.total_questions).unwrap_or(0),
        mean_percent,
        last_taken: latest.map(|r| r.created_at),
        recurring_weak_topics: counts.into_iter().map(|(topic, _)| topic).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizsmith_core::model::TestResult;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn make_result(score: u32, weak_topics: &[&str]) -> StoredTestResult {
        StoredTestResult {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            result: TestResult {
                test_id: Uuid::nil(),
                score,
                total_questions: 10,
                time_taken_secs: 600,
                answers: HashMap::new(),
                weak_topics: weak_topics.iter().map(|t| t.to_string()).collect(),
            },
        }
    }

    #[test]
    fn empty_history_is_zeroed() {
        let summary = summarize(&[]);
        assert_eq!(summary.attempts, 0);
        assert_eq!(summary.best_score, 0);
        assert!(summary.last_taken.is_none());
        assert!(summary.recurring_weak_topics.is_empty());
    }

    #[test]
    fn scores_aggregate_across_attempts() {
        // Newest first: latest attempt scored 8.
        let results = vec![
            make_result(8, &[]),
            make_result(4, &["algebra"]),
            make_result(6, &["algebra", "geometry"]),
        ];
        let summary = summarize(&results);

        assert_eq!(summary.attempts, 3);
        assert_eq!(summary.best_score, 8);
        assert_eq!(summary.latest_score, 8);
        assert_eq!(summary.total_questions, 10);
        assert!((summary.mean_percent - 60.0).abs() < f64::EPSILON);
        assert!(summary.last_taken.is_some());
    }

    #[test]
    fn recurring_topics_ranked_and_capped() {
        let results = vec![
            make_result(3, &["algebra", "geometry"]),
            make_result(4, &["algebra", "calculus"]),
            make_result(5, &["algebra", "statistics", "logic"]),
        ];
        let summary = summarize(&results);

        assert_eq!(summary.recurring_weak_topics.len(), 3);
        assert_eq!(summary.recurring_weak_topics[0], "algebra");
        // Ties rank in first-encountered order.
        assert_eq!(summary.recurring_weak_topics[1], "geometry");
    }
}
