use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{QuizforgeError, Result};

/// Upper bound on questions requested in a single generation
pub const MAX_QUESTIONS: u32 = 50;

/// Kind of question the generator is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuestionType {
    /// Multiple choice with four options and one correct answer
    #[default]
    #[serde(rename = "MCQ")]
    Mcq,

    /// Open-ended question paired with a model answer
    #[serde(rename = "Subjective")]
    Subjective,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::Subjective => "Subjective",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = QuizforgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MCQ" => Ok(QuestionType::Mcq),
            "Subjective" => Ok(QuestionType::Subjective),
            other => Err(QuizforgeError::InvalidParameter {
                key: "question_type".to_string(),
                reason: format!("expected MCQ or Subjective, got '{}'", other),
            }),
        }
    }
}

/// Pages of a document to process, 1-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRange {
    #[default]
    All,
    Span { start: usize, end: usize },
}

impl PageRange {
    /// Zero-based index bounds `[from, to)` of this range over a document
    /// with `page_count` pages. Out-of-range spans are clamped.
    pub fn bounds(&self, page_count: usize) -> (usize, usize) {
        match *self {
            PageRange::All => (0, page_count),
            PageRange::Span { start, end } => {
                let from = start.saturating_sub(1).min(page_count);
                let to = end.min(page_count);
                (from, to.max(from))
            }
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRange::All => f.write_str("all"),
            PageRange::Span { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

impl FromStr for PageRange {
    type Err = QuizforgeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "all" {
            return Ok(PageRange::All);
        }

        let invalid = || QuizforgeError::InvalidPageRange(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start: usize = start.trim().parse().map_err(|_| invalid())?;
        let end: usize = end.trim().parse().map_err(|_| invalid())?;

        if start == 0 || start > end {
            return Err(invalid());
        }

        Ok(PageRange::Span { start, end })
    }
}

impl Serialize for PageRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PageRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parameters of a question generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub num_questions: u32,
    pub question_type: QuestionType,
    pub page_range: PageRange,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            num_questions: 5,
            question_type: QuestionType::Mcq,
            page_range: PageRange::All,
        }
    }
}

impl GenerationParams {
    pub fn validate(&self) -> Result<()> {
        if self.num_questions == 0 || self.num_questions > MAX_QUESTIONS {
            return Err(QuizforgeError::InvalidParameter {
                key: "num_questions".to_string(),
                reason: format!("must be between 1 and {}", MAX_QUESTIONS),
            });
        }
        Ok(())
    }
}

/// One answer option of a multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: char,
    pub text: String,
    pub correct: bool,
}

/// A question recovered from generated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub number: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_answer: Option<String>,
}

impl Question {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            options: Vec::new(),
            correct_option: None,
            model_answer: None,
        }
    }

    /// Number of options flagged as correct
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.correct).count()
    }
}
