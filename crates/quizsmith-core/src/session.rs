//! Test-session state machine.
//!
//! Drives one timed test-taking attempt: navigation, answer tracking, the
//! countdown, and the single transition into the completed state. The
//! machine is synchronous and clock-free; a driver feeds it `tick()` once
//! per second and persists the result it hands back.

use std::collections::HashMap;

use crate::error::SessionError;
use crate::model::{Question, StoredTest, TestResult};
use crate::scoring;

/// Time budget for one attempt: 45 minutes.
pub const TIME_LIMIT_SECS: u64 = 45 * 60;

/// One in-memory test-taking attempt.
///
/// Constructed once the test has been fetched; accepts input until a
/// manual or timer-driven `finish` moves it to the terminal completed
/// state. `completed` is assigned exactly once, which makes the race
/// between a manual finish and timer expiry benign: whichever lands
/// second is a no-op.
#[derive(Debug)]
pub struct TestSession {
    test: StoredTest,
    current_index: usize,
    answers: HashMap<u32, String>,
    time_limit_secs: u64,
    time_remaining_secs: u64,
    completed: bool,
}

impl TestSession {
    /// Start a session over a stored test with the default time budget.
    pub fn new(test: StoredTest) -> Result<Self, SessionError> {
        Self::with_time_limit(test, TIME_LIMIT_SECS)
    }

    /// Start a session with an explicit time budget in seconds.
    pub fn with_time_limit(test: StoredTest, limit_secs: u64) -> Result<Self, SessionError> {
        if test.test.questions.is_empty() {
            return Err(SessionError::EmptyTest);
        }
        Ok(Self {
            test,
            current_index: 0,
            answers: HashMap::new(),
            time_limit_secs: limit_secs,
            time_remaining_secs: limit_secs,
            completed: false,
        })
    }

    pub fn test(&self) -> &StoredTest {
        &self.test
    }

    pub fn question_count(&self) -> usize {
        self.test.test.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question currently shown. The index is always in range.
    pub fn current_question(&self) -> &Question {
        &self.test.test.questions[self.current_index]
    }

    pub fn answers(&self) -> &HashMap<u32, String> {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// The answer recorded for the current question, if any.
    pub fn selected_answer(&self) -> Option<&str> {
        self.answers
            .get(&self.current_question().id)
            .map(String::as_str)
    }

    pub fn time_remaining_secs(&self) -> u64 {
        self.time_remaining_secs
    }

    /// Seconds consumed so far out of the time budget.
    pub fn elapsed_secs(&self) -> u64 {
        self.time_limit_secs - self.time_remaining_secs
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Record an answer for the current question. Reselecting overwrites.
    ///
    /// The option id is stored as given without validating it against the
    /// question's options; an id outside the set simply never scores as
    /// correct.
    pub fn select_answer(&mut self, option_id: impl Into<String>) {
        if self.completed {
            return;
        }
        let question_id = self.current_question().id;
        self.answers.insert(question_id, option_id.into());
    }

    /// Move to the next question; no-op at the last one.
    pub fn go_next(&mut self) {
        if !self.completed && self.current_index + 1 < self.question_count() {
            self.current_index += 1;
        }
    }

    /// Move to the previous question; no-op at the first one.
    pub fn go_previous(&mut self) {
        if !self.completed && self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Jump straight to a question by index; out of range is a no-op.
    pub fn jump_to(&mut self, index: usize) {
        if !self.completed && index < self.question_count() {
            self.current_index = index;
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Called at 1 Hz by the session driver. When the budget runs out the
    /// session finishes itself and the forced result is returned; while
    /// time remains (or once completed) this returns `None`.
    pub fn tick(&mut self) -> Option<TestResult> {
        if self.completed {
            return None;
        }
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            return self.finish();
        }
        None
    }

    /// Complete the session and produce its result.
    ///
    /// The first call transitions to the terminal state and returns the
    /// computed result; any later call returns `None`, so a timer expiry
    /// racing a manual finish cannot double-produce.
    pub fn finish(&mut self) -> Option<TestResult> {
        if self.completed {
            return None;
        }
        self.completed = true;

        let breakdown = scoring::evaluate(&self.test.test, &self.answers);
        Some(TestResult {
            test_id: self.test.id,
            score: breakdown.score,
            total_questions: breakdown.total,
            time_taken_secs: self.elapsed_secs(),
            answers: self.answers.clone(),
            weak_topics: breakdown.weak_topics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, Difficulty, Test};
    use chrono::Utc;
    use uuid::Uuid;

    fn make_stored_test(question_count: u32) -> StoredTest {
        let questions = (1..=question_count)
            .map(|id| Question {
                id,
                text: format!("Question {id}"),
                options: vec![
                    AnswerOption {
                        id: "A".into(),
                        text: "first".into(),
                    },
                    AnswerOption {
                        id: "B".into(),
                        text: "second".into(),
                    },
                ],
                correct_answer: "A".into(),
                explanation: None,
            })
            .collect();
        StoredTest {
            id: Uuid::nil(),
            created_at: Utc::now(),
            test: Test {
                title: "Session".into(),
                description: String::new(),
                questions,
                subject_area: "Math".into(),
                difficulty: Difficulty::Beginner,
                topics: None,
                raw_content: String::new(),
            },
        }
    }

    #[test]
    fn empty_test_is_rejected() {
        let mut stored = make_stored_test(1);
        stored.test.questions.clear();
        assert_eq!(
            TestSession::new(stored).unwrap_err(),
            SessionError::EmptyTest
        );
    }

    #[test]
    fn navigation_clamps_at_boundaries() {
        let mut session = TestSession::new(make_stored_test(3)).unwrap();
        session.go_previous();
        assert_eq!(session.current_index(), 0);

        session.go_next();
        session.go_next();
        assert_eq!(session.current_index(), 2);
        session.go_next();
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn jump_to_in_range_only() {
        let mut session = TestSession::new(make_stored_test(3)).unwrap();
        session.jump_to(2);
        assert_eq!(session.current_index(), 2);
        session.jump_to(7);
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn reselecting_overwrites() {
        let mut session = TestSession::new(make_stored_test(2)).unwrap();
        session.select_answer("A");
        session.select_answer("B");
        assert_eq!(session.selected_answer(), Some("B"));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn out_of_range_selection_is_stored_but_never_correct() {
        let mut session = TestSession::new(make_stored_test(1)).unwrap();
        session.select_answer("Z");
        assert_eq!(session.selected_answer(), Some("Z"));
        let result = session.finish().unwrap();
        assert_eq!(result.score, 0);
    }

    #[test]
    fn finish_scores_and_snapshots_answers() {
        let mut session = TestSession::new(make_stored_test(3)).unwrap();
        session.select_answer("A");
        session.go_next();
        session.select_answer("A");
        session.go_next();
        session.select_answer("B");

        let result = session.finish().unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.answers.len(), 3);
        assert!(session.is_completed());
    }

    #[test]
    fn finish_is_idempotent() {
        let mut session = TestSession::new(make_stored_test(1)).unwrap();
        assert!(session.finish().is_some());
        assert!(session.finish().is_none());
        assert!(session.tick().is_none());
    }

    #[test]
    fn input_after_completion_is_ignored() {
        let mut session = TestSession::new(make_stored_test(2)).unwrap();
        session.finish();
        session.select_answer("A");
        session.go_next();
        session.jump_to(1);
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn timer_expiry_forces_exactly_one_completion() {
        let mut session =
            TestSession::with_time_limit(make_stored_test(1), TIME_LIMIT_SECS).unwrap();

        let mut results = Vec::new();
        for _ in 0..TIME_LIMIT_SECS {
            if let Some(result) = session.tick() {
                results.push(result);
            }
        }

        assert_eq!(results.len(), 1);
        assert!(session.is_completed());
        assert_eq!(session.time_remaining_secs(), 0);
        assert_eq!(results[0].time_taken_secs, TIME_LIMIT_SECS);
    }

    #[test]
    fn time_taken_reflects_elapsed_budget() {
        let mut session = TestSession::with_time_limit(make_stored_test(1), 100).unwrap();
        for _ in 0..40 {
            session.tick();
        }
        let result = session.finish().unwrap();
        assert_eq!(result.time_taken_secs, 40);
    }
}
