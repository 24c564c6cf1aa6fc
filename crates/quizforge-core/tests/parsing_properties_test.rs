//! Property tests for the text handling helpers
//!
//! These functions all consume untrusted input (client filenames, form
//! fields, generator output) and must never panic.

use chrono::Utc;
use proptest::prelude::*;
use quizforge_core::formats::sanitize_filename;
use quizforge_core::models::{PageRange, QuestionType};
use quizforge_core::processing::{parse_evaluation, parse_questions, truncate_chars};

proptest! {
    #[test]
    fn prop_truncate_is_bounded_prefix(text in ".{0,200}", n in 0usize..250) {
        let truncated = truncate_chars(&text, n);
        prop_assert!(text.starts_with(truncated));
        prop_assert!(truncated.chars().count() <= n);
        prop_assert_eq!(truncated.chars().count(), n.min(text.chars().count()));
    }

    #[test]
    fn prop_sanitized_filename_is_safe(name in ".{0,80}") {
        let sanitized = sanitize_filename(&name);
        prop_assert!(!sanitized.is_empty());
        prop_assert!(!sanitized.starts_with('.'));
        prop_assert!(sanitized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
    }

    #[test]
    fn prop_evaluation_score_in_range(text in ".{0,300}") {
        let eval = parse_evaluation(&text, Utc::now());
        prop_assert!((0.0..=100.0).contains(&eval.score));
    }

    #[test]
    fn prop_evaluation_numeric_score(score in -1000i64..1000) {
        let text = format!("{{\"score\": {}, \"feedback\": \"f\"}}", score);
        let eval = parse_evaluation(&text, Utc::now());
        prop_assert_eq!(eval.score, (score as f64).clamp(0.0, 100.0));
        prop_assert!(eval.error.is_none());
    }

    #[test]
    fn prop_valid_span_parses(start in 1usize..500, len in 0usize..500) {
        let end = start + len;
        let parsed: PageRange = format!("{}-{}", start, end).parse().unwrap();
        prop_assert_eq!(parsed, PageRange::Span { start, end });
        let (from, to) = parsed.bounds(250);
        prop_assert!(from <= to && to <= 250);
    }

    #[test]
    fn prop_question_parser_total(text in "(Q[0-9]{1,2}\\) [a-z ]{0,20}\n|[A-D]\\) [a-z ]{0,10}( \\(Correct\\))?\n|[a-z ]{0,30}\n){0,20}") {
        for question in parse_questions(&text, QuestionType::Mcq) {
            prop_assert!(question.options.len() <= 4 * 20);
            prop_assert!(question.correct_option.is_none() || question.correct_count() >= 1);
        }
    }
}
