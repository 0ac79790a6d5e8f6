//! Prompt builders for test and learning-pathway generation.

use crate::model::TestParams;
use crate::pathway::PathwayParams;

/// System prompt for the test-generation role.
pub const TEST_SYSTEM_PROMPT: &str =
    "You are an expert test creator that generates high-quality educational assessments.";

/// System prompt for the learning-pathway role.
pub const PATHWAY_SYSTEM_PROMPT: &str = "You are an expert learning path designer who creates structured, concise, and personalized learning pathways. You focus on creating practical, actionable learning plans limited to 8-10 weeks maximum.";

/// Number of questions requested per generated test.
pub const QUESTIONS_PER_TEST: u32 = 10;

/// Token budget for a test completion.
pub const TEST_MAX_TOKENS: u32 = 4000;

/// Token budget for a pathway completion.
pub const PATHWAY_MAX_TOKENS: u32 = 2500;

/// Build the test-generation prompt from caller parameters.
///
/// The formatting guidelines here are what the parser expects back:
/// numbered questions, options A-D, and a trailing "Answer Key" section.
pub fn build_test_prompt(params: &TestParams) -> String {
    let mut prompt = format!(
        "You are an expert educator. Create a test with {QUESTIONS_PER_TEST} multiple choice questions on the subject: \"{}\".\n",
        params.subject_area
    );
    prompt.push_str(&format!(
        "The questions should be at a {} level.",
        params.difficulty
    ));

    if let Some(topics) = params.topics.as_deref().filter(|t| !t.trim().is_empty()) {
        prompt.push_str(&format!(
            " Focus specifically on the following topics: {topics}."
        ));
    }

    prompt.push_str(
        "\n\nFormatting Guidelines:\n\
         - Provide a title and a brief 2-3 sentence description of the test.\n\
         - Number each question (1 to 10).\n\
         - Each question must include 4 options labeled A, B, C, and D.\n\
         - Only one correct answer per question.\n\
         - Ensure a mix of conceptual understanding, factual recall, and application-based questions.\n\
         - Avoid repeating the same structure or phrasing across questions.\n\
         \n\
         At the end, include an \"Answer Key\" section listing the correct option for each question like:\n\
         Answer Key:\n\
         1. B\n\
         2. A\n\
         ...\n\
         \n\
         Generate only the test and answer key, no explanations.",
    );

    prompt
}

/// Build the learning-pathway prompt from caller parameters.
pub fn build_pathway_prompt(params: &PathwayParams) -> String {
    let mut prompt = format!(
        "Design a concise, structured learning pathway for someone who wants to learn {}.",
        params.goal
    );
    prompt.push_str(&format!(
        " The learner's current level is {} and they can commit {} hours per week.",
        params.level, params.hours_per_week
    ));

    if !params.methods.is_empty() {
        prompt.push_str(&format!(
            " They prefer learning through: {}.",
            params.methods.join(", ")
        ));
    }

    prompt.push_str(
        "\n\
         Important guidelines:\n\
         1. Limit the plan to a MAXIMUM of 8-10 weeks (do not exceed 10 weeks).\n\
         2. Structure the output clearly with Week 1:, Week 2:, etc. at the start of each week.\n\
         3. For each week, provide 3-5 specific learning tasks, resources, or exercises.\n\
         4. Balance theory with practical applications.\n\
         5. Include specific, actionable items for each week.\n\
         6. Ensure the weekly workload fits within their time commitment.\n\
         7. Keep explanations brief and focused.\n\
         \n\
         Format your response following this example structure:\n\
         Week 1:\n\
         - Topic/Concept 1 (brief description, resource)\n\
         - Activity/Exercise\n\
         - Project component\n\
         \n\
         Week 2:\n\
         - Topic/Concept 2 (brief description, resource)\n\
         - Activity/Exercise\n\
         ...and so on\n\
         \n\
         Make sure all resources mentioned are specific and real.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    #[test]
    fn test_prompt_includes_subject_and_difficulty() {
        let params = TestParams {
            subject_area: "Linear Algebra".into(),
            topics: None,
            difficulty: Difficulty::Advanced,
        };
        let prompt = build_test_prompt(&params);
        assert!(prompt.contains("\"Linear Algebra\""));
        assert!(prompt.contains("advanced level"));
        assert!(prompt.contains("Answer Key"));
        assert!(!prompt.contains("Focus specifically"));
    }

    #[test]
    fn test_prompt_includes_topics_when_present() {
        let params = TestParams {
            subject_area: "Calculus".into(),
            topics: Some("limits, derivatives".into()),
            difficulty: Difficulty::Beginner,
        };
        let prompt = build_test_prompt(&params);
        assert!(prompt.contains("Focus specifically on the following topics: limits, derivatives."));
    }

    #[test]
    fn blank_topics_are_ignored() {
        let params = TestParams {
            subject_area: "Calculus".into(),
            topics: Some("   ".into()),
            difficulty: Difficulty::Beginner,
        };
        assert!(!build_test_prompt(&params).contains("Focus specifically"));
    }

    #[test]
    fn pathway_prompt_includes_goal_level_and_methods() {
        let params = PathwayParams {
            goal: "Rust".into(),
            level: Difficulty::Beginner,
            hours_per_week: "5-10".into(),
            methods: vec!["videos".into(), "projects".into()],
        };
        let prompt = build_pathway_prompt(&params);
        assert!(prompt.contains("learn Rust"));
        assert!(prompt.contains("beginner"));
        assert!(prompt.contains("5-10 hours per week"));
        assert!(prompt.contains("videos, projects"));
        assert!(prompt.contains("Week 1:"));
    }
}
