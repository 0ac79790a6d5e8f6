//! Test-content parser.
//!
//! Turns the free-form text of an LLM completion into structured
//! multiple-choice questions with an answer key. Model output arrives with
//! unpredictable markup, so matching is best-effort line scanning:
//! malformed questions are dropped silently and the one hard failure is
//! extracting zero questions.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::model::{AnswerOption, Question};

/// Title used when the completion has no usable leading line.
pub const DEFAULT_TITLE: &str = "Generated Test";
/// Description used when no description lines precede the first question.
pub const DEFAULT_DESCRIPTION: &str = "Test your knowledge with these questions.";

// Answer-key entries come in several shapes: "1. A", "2: B", "Question 3 C".
static RE_ANSWER_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Question\s*)?(\d+)[.:]?\s*([A-D])").expect("static regex")
});
static RE_QUESTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Question\s+(\d+)\*\*").expect("static regex"));
static RE_QUESTION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+").expect("static regex"));
// Loose form for capturing options; the separator is optional.
static RE_OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-D])[.)]?\s+(.+?)(?:\*\*)?$").expect("static regex"));
// Strict form for ending prompt accumulation. Without the mandatory
// separator a prompt like "A train leaves at noon" would read as option A.
static RE_OPTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-D][.)]\s").expect("static regex"));

/// A parsed test before caller metadata is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTest {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub raw_content: String,
}

/// A question being accumulated during the line scan.
struct PendingQuestion {
    id: u32,
    text: String,
    options: Vec<AnswerOption>,
}

/// Parse raw generated test content into a [`ParsedTest`].
///
/// Pure function of its input: parsing the same text twice yields
/// structurally identical output. Fails only when no valid question can
/// be extracted, which callers surface as "regenerate the test".
pub fn parse_test_content(raw_content: &str) -> Result<ParsedTest, ParseError> {
    let lines: Vec<&str> = raw_content.lines().collect();

    let (title, title_idx) = extract_title(&lines);
    let description = extract_description(&lines, title_idx);

    // Answer key first, so correct answers can be attached in one pass.
    let answer_key_idx = lines.iter().position(|l| {
        let lower = l.to_lowercase();
        lower.contains("answer key") || lower.contains("answers:")
    });
    let answer_map = build_answer_map(&lines, answer_key_idx);

    let scan_end = answer_key_idx.unwrap_or(lines.len());
    let mut questions: Vec<Question> = Vec::new();
    let mut current: Option<PendingQuestion> = None;

    let mut i = 0;
    while i < scan_end {
        let line = lines[i].trim();
        i += 1;
        if line.is_empty() {
            continue;
        }

        if let Some((id, same_line_text)) = match_question_boundary(line) {
            flush(current.take(), &mut questions);

            let mut pending = PendingQuestion {
                id,
                text: same_line_text,
                options: Vec::new(),
            };

            // No prompt on the boundary line: accumulate the following
            // lines until an option or the next question starts.
            if pending.text.is_empty() {
                while i < scan_end {
                    let next = lines[i].trim();
                    if RE_OPTION_BOUNDARY.is_match(next) || match_question_boundary(next).is_some()
                    {
                        break;
                    }
                    if !next.is_empty() && !next.starts_with("**") {
                        if !pending.text.is_empty() {
                            pending.text.push(' ');
                        }
                        pending.text.push_str(next);
                    }
                    i += 1;
                }
            }

            current = Some(pending);
            continue;
        }

        if let Some(caps) = RE_OPTION_LINE.captures(line) {
            // An option line outside any question is dropped.
            if let Some(pending) = current.as_mut() {
                let id = caps[1].to_uppercase();
                // Duplicate letters are skipped so re-stated options stay idempotent.
                if !pending.options.iter().any(|o| o.id == id) {
                    pending.options.push(AnswerOption {
                        id,
                        text: caps[2].trim().to_string(),
                    });
                }
            }
        }
    }
    flush(current.take(), &mut questions);

    // Attach correct answers: the answer-key entry when it names a present
    // option, otherwise the first option. Guarantees the structural
    // invariant that `correct_answer` is a member of `options`.
    for question in &mut questions {
        let from_key = answer_map
            .get(&question.id)
            .filter(|letter| question.options.iter().any(|o| &o.id == *letter))
            .cloned();
        question.correct_answer = match from_key {
            Some(letter) => letter,
            None => question.options[0].id.clone(),
        };
    }

    if questions.is_empty() {
        tracing::warn!(
            content_len = raw_content.len(),
            "no questions extracted from generated content"
        );
        return Err(ParseError::NoQuestions);
    }

    Ok(ParsedTest {
        title: if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title
        },
        description: if description.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            description
        },
        questions,
        raw_content: raw_content.to_string(),
    })
}

/// First non-empty line with emphasis markers stripped, and its index.
fn extract_title(lines: &[&str]) -> (String, usize) {
    for (idx, line) in lines.iter().enumerate() {
        let cleaned = line.replace("**", "");
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            return (cleaned.to_string(), idx);
        }
    }
    (String::new(), 0)
}

/// Lines after the title up to the first mention of "question", with
/// emphasis-markup lines excluded, joined into one paragraph.
fn extract_description(lines: &[&str], title_idx: usize) -> String {
    let mut parts = Vec::new();
    for line in lines.iter().skip(title_idx + 1) {
        if line.to_lowercase().contains("question") {
            break;
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.contains("**") {
            parts.push(trimmed);
        }
    }
    parts.join(" ")
}

/// Scan the lines after the answer-key marker for `number -> letter`
/// entries. Lines that match nothing are ignored.
fn build_answer_map(lines: &[&str], answer_key_idx: Option<usize>) -> HashMap<u32, String> {
    let mut map = HashMap::new();
    let Some(idx) = answer_key_idx else {
        return map;
    };
    for line in &lines[idx + 1..] {
        if let Some(caps) = RE_ANSWER_ENTRY.captures(line.trim()) {
            if let Ok(number) = caps[1].parse::<u32>() {
                map.insert(number, caps[2].to_uppercase());
            }
        }
    }
    map
}

/// Match a question boundary: a `**Question <n>**` heading anywhere in the
/// line, or a plain leading `<n>.`. Returns the question number and any
/// prompt text trailing the marker on the same line.
fn match_question_boundary(line: &str) -> Option<(u32, String)> {
    if let Some(caps) = RE_QUESTION_HEADING.captures(line) {
        let id = caps[1].parse::<u32>().ok()?;
        let rest = line[caps.get(0)?.end()..]
            .trim_start_matches([':', '.', '-'])
            .trim();
        return Some((id, rest.to_string()));
    }
    if let Some(caps) = RE_QUESTION_NUMBER.captures(line) {
        let id = caps[1].parse::<u32>().ok()?;
        let rest = line[caps.get(0)?.end()..].trim();
        return Some((id, rest.to_string()));
    }
    None
}

/// Accept the accumulated question only if it has a usable number and at
/// least one option; anything else is silently dropped.
fn flush(pending: Option<PendingQuestion>, questions: &mut Vec<Question>) {
    let Some(pending) = pending else { return };
    if pending.id == 0 || pending.options.is_empty() {
        tracing::warn!(id = pending.id, "dropping malformed question");
        return;
    }
    questions.push(Question {
        id: pending.id,
        text: pending.text,
        options: pending.options,
        correct_answer: String::new(),
        explanation: None,
    });
}
