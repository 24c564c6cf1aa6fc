//! Prompt construction and interpretation of generator output

pub mod prompt;
pub mod questions;
pub mod response;

pub use prompt::{evaluation_prompt, question_prompt, search_prompt, PROMPT_TEXT_LIMIT};
pub use questions::parse_questions;
pub use response::{extract_json_object, parse_evaluation};

/// Prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
