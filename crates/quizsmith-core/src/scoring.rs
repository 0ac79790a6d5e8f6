//! Scoring and weak-topic analysis for completed sessions.
//!
//! Scoring never fails: unanswered or out-of-range selections count as
//! incorrect, and topic inference degrades to an empty list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Question, Test};

/// Keyword dictionary for inferring topics from question text when a test
/// carries no explicit topic list.
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("equations", &["equation", "solve", "value", "solve for"]),
    ("expressions", &["expression", "simplify", "equivalent", "terms"]),
    ("functions", &["function", "domain", "range", "graph", "f(x)"]),
    (
        "geometry",
        &["angle", "triangle", "circle", "polygon", "area", "volume"],
    ),
    (
        "algebra",
        &["variable", "coefficient", "factor", "factorize", "polynomial"],
    ),
    (
        "calculus",
        &["derivative", "integral", "limit", "differentiate", "integrate"],
    ),
    (
        "statistics",
        &[
            "probability",
            "mean",
            "median",
            "standard deviation",
            "normal distribution",
        ],
    ),
    ("logic", &["logic", "truth", "proposition", "logical", "argument"]),
];

/// Maximum number of weak topics reported per result.
const MAX_WEAK_TOPICS: usize = 3;

/// Outcome of scoring one set of answers against a test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Count of correctly answered questions.
    pub score: u32,
    /// Number of questions in the test.
    pub total: u32,
    /// Ids of correctly answered questions, in test order.
    pub correct: Vec<u32>,
    /// Ids of incorrectly answered (or unanswered) questions, in test order.
    pub incorrect: Vec<u32>,
    /// Up to three topics ranked by miss count, worst first.
    pub weak_topics: Vec<String>,
}

/// Score a test against the answers collected during a session.
pub fn evaluate(test: &Test, answers: &HashMap<u32, String>) -> ScoreBreakdown {
    let mut correct = Vec::new();
    let mut incorrect_questions: Vec<&Question> = Vec::new();

    for question in &test.questions {
        match answers.get(&question.id) {
            Some(selected) if *selected == question.correct_answer => correct.push(question.id),
            _ => incorrect_questions.push(question),
        }
    }

    let weak_topics = weak_topics(test, &incorrect_questions);

    ScoreBreakdown {
        score: correct.len() as u32,
        total: test.questions.len() as u32,
        correct,
        incorrect: incorrect_questions.iter().map(|q| q.id).collect(),
        weak_topics,
    }
}

/// Attribute incorrect questions to topics and rank the worst offenders.
///
/// With explicit test topics the attribution is coarse: every miss counts
/// against every listed topic. Otherwise each miss counts against every
/// keyword-matched topic, possibly several or none.
fn weak_topics(test: &Test, incorrect: &[&Question]) -> Vec<String> {
    // Miss counts kept in first-encountered order so the stable sort
    // breaks ties deterministically.
    let mut misses: Vec<(String, u32)> = Vec::new();

    fn bump(misses: &mut Vec<(String, u32)>, topic: &str) {
        if let Some(entry) = misses.iter_mut().find(|(t, _)| t == topic) {
            entry.1 += 1;
        } else {
            misses.push((topic.to_string(), 1));
        }
    }

    let explicit = test.topic_labels();
    for question in incorrect {
        if !explicit.is_empty() {
            for topic in &explicit {
                bump(&mut misses, topic);
            }
        } else {
            let text = question.text.to_lowercase();
            for (topic, keywords) in TOPIC_KEYWORDS {
                if keywords.iter().any(|k| text.contains(k)) {
                    bump(&mut misses, topic);
                }
            }
        }
    }

    misses.sort_by(|a, b| b.1.cmp(&a.1));
    misses.truncate(MAX_WEAK_TOPICS);
    misses.into_iter().map(|(topic, _)| topic).collect()
}
