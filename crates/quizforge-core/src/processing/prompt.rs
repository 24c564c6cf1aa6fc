use std::fmt::Write;

use crate::models::{GenerationParams, QuestionType};
use crate::processing::truncate_chars;

/// Maximum number of document characters embedded in a generation prompt
pub const PROMPT_TEXT_LIMIT: usize = 20_000;

/// Build the question generation prompt for extracted document text
pub fn question_prompt(text: &str, params: &GenerationParams) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Generate {} {} questions from this text:",
        params.num_questions, params.question_type
    );
    prompt.push_str(truncate_chars(text, PROMPT_TEXT_LIMIT));
    prompt.push_str("\n\nRequirements:\n");

    match params.question_type {
        QuestionType::Mcq => {
            prompt.push_str("- Include exactly 4 options per question\n");
            prompt.push_str("- Mark exactly ONE correct answer with (Correct) for each question\n");
            prompt.push_str("- Format each question with Q1, Q2, etc.\n");
            prompt.push_str("- Use EXACTLY this format for MCQs:\n");
            prompt.push_str("  Q1) Question text?\n");
            prompt.push_str("  A) Option 1\n");
            prompt.push_str("  B) Option 2 (Correct)\n");
            prompt.push_str("  C) Option 3\n");
            prompt.push_str("  D) Option 4\n");
            prompt.push_str("- VERY IMPORTANT: Only mark ONE option as (Correct) per question\n");
        }
        QuestionType::Subjective => {
            prompt.push_str("- Provide detailed model answers\n");
            prompt.push_str("- Format each question with Q1, Q2, etc.\n");
            prompt.push_str("\nFor subjective questions use:\n");
            prompt.push_str("Q1) Question text?\n");
            prompt.push_str("Model Answer: Detailed explanation...\n");
        }
    }

    prompt
}

/// Build the grading prompt comparing a student answer with a model answer
pub fn evaluation_prompt(student_answer: &str, model_answer: &str) -> String {
    format!(
        "Evaluate this student answer: {student_answer}\n\
         Against this model answer: {model_answer}\n\
         \n\
         Provide:\n\
         1. Score (0-100)\n\
         2. Detailed feedback\n\
         3. Key missed points\n\
         4. Suggestions for improvement\n\
         \n\
         Return as valid JSON with these keys: score, feedback, missed_points, suggestions\n"
    )
}

/// Build the academic search prompt
pub fn search_prompt(query: &str) -> String {
    format!(
        "Provide a comprehensive, academic answer to: {query}\n\
         Include key concepts, examples, and sources if available."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageRange;

    fn params(n: u32, question_type: QuestionType) -> GenerationParams {
        GenerationParams { num_questions: n, question_type, page_range: PageRange::All }
    }

    #[test]
    fn test_mcq_prompt_format_rules() {
        let prompt = question_prompt("Photosynthesis converts light.", &params(3, QuestionType::Mcq));
        assert!(prompt.starts_with("Generate 3 MCQ questions from this text:"));
        assert!(prompt.contains("Photosynthesis converts light."));
        assert!(prompt.contains("exactly 4 options"));
        assert!(prompt.contains("B) Option 2 (Correct)"));
        assert!(!prompt.contains("Model Answer:"));
    }

    #[test]
    fn test_subjective_prompt_format_rules() {
        let prompt = question_prompt("Text", &params(2, QuestionType::Subjective));
        assert!(prompt.starts_with("Generate 2 Subjective questions"));
        assert!(prompt.contains("Model Answer:"));
        assert!(!prompt.contains("(Correct)"));
    }

    #[test]
    fn test_prompt_truncates_document_text() {
        let text = format!("{}TAIL", "x".repeat(PROMPT_TEXT_LIMIT));
        let prompt = question_prompt(&text, &params(1, QuestionType::Mcq));
        assert!(!prompt.contains("TAIL"));
        assert!(prompt.contains(&"x".repeat(PROMPT_TEXT_LIMIT)));
    }

    #[test]
    fn test_evaluation_prompt_embeds_both_answers() {
        let prompt = evaluation_prompt("Mitochondria make energy", "ATP synthesis in mitochondria");
        assert!(prompt.contains("Evaluate this student answer: Mitochondria make energy"));
        assert!(prompt.contains("Against this model answer: ATP synthesis in mitochondria"));
        assert!(prompt.contains("score, feedback, missed_points, suggestions"));
    }

    #[test]
    fn test_search_prompt() {
        let prompt = search_prompt("entropy");
        assert!(prompt.starts_with("Provide a comprehensive, academic answer to: entropy"));
    }
}
