//! The `quizsmith take` command.
//!
//! Drives one interactive test session in the terminal: renders the
//! current question, accepts answer and navigation commands on stdin,
//! and advances the countdown once per second. The interval timer is
//! scoped to the select loop, so every exit path tears it down.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use uuid::Uuid;

use quizsmith_core::model::TestResult;
use quizsmith_core::session::TestSession;
use quizsmith_core::traits::{ResultStore, TestStore};
use quizsmith_providers::config::load_config_from;
use quizsmith_store::JsonStore;

use super::format_time;

pub async fn execute(
    test_id: Uuid,
    time_limit_secs: u64,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = JsonStore::new(data_dir.unwrap_or_else(|| config.data_dir.clone()));

    // Fetch failure is terminal for the session; there is no retry loop
    // here, the user starts over with `list`/`generate`.
    let stored = store.get_test(test_id).await?;

    let mut session = TestSession::with_time_limit(stored, time_limit_secs)?;

    println!("{}", session.test().test.title);
    println!("{}\n", session.test().test.description);
    println!(
        "{} questions, {} on the clock.",
        session.question_count(),
        format_time(session.time_remaining_secs())
    );
    print_help();

    let result = run_session(&mut session).await?;

    match result {
        Some(result) => {
            print_result(&session, &result);
            // Best-effort persistence: the local result stands either way.
            if let Err(e) = store.save_result(&result).await {
                warn!("failed to save result: {e:#}");
                eprintln!("Warning: result could not be saved; it is shown above only.");
            }
        }
        None => println!("Session abandoned; no result recorded."),
    }

    Ok(())
}

enum Action {
    Redraw,
    Finish,
    Quit,
    Ignore,
}

/// Pump stdin commands and 1 Hz ticks into the session until it
/// completes or the user quits.
async fn run_session(session: &mut TestSession) -> Result<Option<TestResult>> {
    let mut input_lines = BufReader::new(tokio::io::stdin()).lines();
    let mut timer = tokio::time::interval(std::time::Duration::from_secs(1));
    timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first tick fires immediately; consume it so the countdown
    // starts a full second from now.
    timer.tick().await;

    render_question(session);

    loop {
        tokio::select! {
            _ = timer.tick() => {
                if let Some(result) = session.tick() {
                    println!("\nTime is up!");
                    return Ok(Some(result));
                }
                if session.time_remaining_secs() == 300 {
                    println!("\n5 minutes remaining.");
                }
            }
            line = input_lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed: score whatever has been answered.
                    return Ok(session.finish());
                };
                match handle_command(session, line.trim()) {
                    Action::Redraw => render_question(session),
                    Action::Finish => return Ok(session.finish()),
                    Action::Quit => return Ok(None),
                    Action::Ignore => {}
                }
            }
        }
    }
}

fn handle_command(session: &mut TestSession, input: &str) -> Action {
    match input {
        "" => Action::Ignore,
        "n" | "next" => {
            session.go_next();
            Action::Redraw
        }
        "p" | "prev" => {
            session.go_previous();
            Action::Redraw
        }
        "f" | "finish" => Action::Finish,
        "q" | "quit" => Action::Quit,
        "h" | "help" => {
            print_help();
            Action::Ignore
        }
        other => {
            if let Some(rest) = other.strip_prefix("g ") {
                if let Ok(number) = rest.trim().parse::<usize>() {
                    session.jump_to(number.saturating_sub(1));
                    return Action::Redraw;
                }
            }
            if other.len() == 1 && other.chars().all(|c| c.is_ascii_alphabetic()) {
                // Stored as given; a letter outside the option set simply
                // never scores as correct.
                session.select_answer(other.to_uppercase());
                return Action::Redraw;
            }
            println!("Unrecognized command; type h for help.");
            Action::Ignore
        }
    }
}

fn print_help() {
    println!(
        "Commands: A-D select an answer, n/p move, g <num> jump, f finish, q quit, h help.\n"
    );
}

fn render_question(session: &TestSession) {
    let question = session.current_question();
    println!(
        "\nQuestion {} of {}  [answered {}/{}, {} left]",
        session.current_index() + 1,
        session.question_count(),
        session.answered_count(),
        session.question_count(),
        format_time(session.time_remaining_secs()),
    );
    println!("{}", question.text);
    for option in &question.options {
        let marker = if session.selected_answer() == Some(option.id.as_str()) {
            ">"
        } else {
            " "
        };
        println!("{marker} {}. {}", option.id, option.text);
    }
}

fn print_result(session: &TestSession, result: &TestResult) {
    let test = &session.test().test;

    println!("\nResults — {}", test.title);
    println!(
        "Score: {}/{} ({:.0}%), time taken {}",
        result.score,
        result.total_questions,
        result.percent(),
        format_time(result.time_taken_secs),
    );

    let mut table = Table::new();
    table.set_header(vec!["#", "Your answer", "Correct answer", ""]);
    for question in &test.questions {
        let selected = result
            .answers
            .get(&question.id)
            .map(String::as_str)
            .unwrap_or("-");
        let correct = selected == question.correct_answer;
        table.add_row(vec![
            Cell::new(question.id),
            Cell::new(selected),
            Cell::new(&question.correct_answer),
            Cell::new(if correct { "OK" } else { "MISS" }),
        ]);
    }
    println!("{table}");

    for question in &test.questions {
        let missed = result.answers.get(&question.id) != Some(&question.correct_answer);
        if missed {
            if let Some(explanation) = &question.explanation {
                println!("Q{}: {}", question.id, explanation);
            }
        }
    }

    if result.weak_topics.is_empty() {
        println!("Great job! No specific weak areas detected.");
    } else {
        println!("Areas for improvement: {}", result.weak_topics.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quizsmith_core::model::{AnswerOption, Difficulty, Question, StoredTest, Test};

    fn make_session() -> TestSession {
        let questions = (1..=3)
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
        let stored = StoredTest {
            id: Uuid::nil(),
            created_at: Utc::now(),
            test: Test {
                title: "Fixture".into(),
                description: String::new(),
                questions,
                subject_area: "Math".into(),
                difficulty: Difficulty::Beginner,
                topics: None,
                raw_content: String::new(),
            },
        };
        TestSession::new(stored).unwrap()
    }

    #[test]
    fn letters_select_uppercased() {
        let mut session = make_session();
        assert!(matches!(handle_command(&mut session, "b"), Action::Redraw));
        assert_eq!(session.selected_answer(), Some("B"));
    }

    #[test]
    fn jump_is_one_based() {
        let mut session = make_session();
        assert!(matches!(handle_command(&mut session, "g 3"), Action::Redraw));
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn finish_and_quit_map_to_actions() {
        let mut session = make_session();
        assert!(matches!(handle_command(&mut session, "f"), Action::Finish));
        assert!(matches!(handle_command(&mut session, "q"), Action::Quit));
    }

    #[test]
    fn junk_input_is_ignored() {
        let mut session = make_session();
        assert!(matches!(
            handle_command(&mut session, "launch the missiles"),
            Action::Ignore
        ));
        assert_eq!(session.answered_count(), 0);
    }
}
