use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of grading a student answer against a model answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Score in the range 0..=100
    pub score: f64,

    pub feedback: String,

    #[serde(default)]
    pub missed_points: Vec<String>,

    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Set when the generator output could not be interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Raw generator output, kept only when parsing failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_response: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl Evaluation {
    pub const MAX_SCORE: f64 = 100.0;

    pub fn new(score: f64, feedback: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            score: clamp_score(score),
            feedback: feedback.into(),
            missed_points: Vec::new(),
            suggestions: Vec::new(),
            error: None,
            original_response: None,
            timestamp,
        }
    }

    /// Zero-score evaluation returned when the generator output is unusable
    pub fn unparseable(
        reason: impl Into<String>,
        original_response: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            score: 0.0,
            feedback: "Could not parse evaluation".to_string(),
            missed_points: Vec::new(),
            suggestions: Vec::new(),
            error: Some(reason.into()),
            original_response: Some(original_response.into()),
            timestamp,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Clamp a score into 0..=100, mapping NaN to 0
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, Evaluation::MAX_SCORE)
    }
}
