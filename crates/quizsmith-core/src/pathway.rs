//! Learning-pathway types and parsing.
//!
//! Parses the `Week N:` structure the pathway prompt asks the model to
//! produce. Same policy as the test parser: tolerate arbitrary
//! formatting, fail only when nothing usable was found.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::model::Difficulty;

static RE_WEEK_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\**\s*week\s+(\d+)\s*\**\s*:?").expect("static regex")
});
static RE_BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]|\d+\.)\s+(.+)$").expect("static regex"));

/// Caller-supplied parameters for pathway generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathwayParams {
    /// What the learner wants to learn.
    pub goal: String,
    /// The learner's current level.
    pub level: Difficulty,
    /// Weekly time commitment, e.g. "5-10".
    pub hours_per_week: String,
    /// Preferred learning methods.
    #[serde(default)]
    pub methods: Vec<String>,
}

/// One week of a parsed pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayWeek {
    /// Week number as declared in the completion.
    pub number: u32,
    /// Learning tasks listed under the week heading.
    pub items: Vec<String>,
}

/// A structured learning pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPathway {
    /// Weeks in declaration order.
    pub weeks: Vec<PathwayWeek>,
    /// The original unparsed completion.
    pub raw_content: String,
}

/// Parse `Week N:` sections out of a pathway completion.
///
/// Bullet lines under a heading become that week's items; stray prose is
/// ignored. Zero weeks found is the one hard failure.
pub fn parse_pathway(raw_content: &str) -> Result<LearningPathway, ParseError> {
    let mut weeks: Vec<PathwayWeek> = Vec::new();

    for line in raw_content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = RE_WEEK_HEADING.captures(line) {
            if let Ok(number) = caps[1].parse::<u32>() {
                let mut week = PathwayWeek {
                    number,
                    items: Vec::new(),
                };
                // The first task sometimes trails the heading itself.
                if let Some(m) = caps.get(0) {
                    let rest = line[m.end()..].trim_start_matches(['-', '*']).trim();
                    if !rest.is_empty() {
                        week.items.push(rest.to_string());
                    }
                }
                weeks.push(week);
                continue;
            }
        }

        if let Some(caps) = RE_BULLET_ITEM.captures(line) {
            if let Some(week) = weeks.last_mut() {
                week.items.push(caps[1].trim().to_string());
            }
        }
    }

    if weeks.is_empty() {
        tracing::warn!(
            content_len = raw_content.len(),
            "no weekly sections found in generated pathway"
        );
        return Err(ParseError::NoWeeks);
    }

    Ok(LearningPathway {
        weeks,
        raw_content: raw_content.to_string(),
    })
}
