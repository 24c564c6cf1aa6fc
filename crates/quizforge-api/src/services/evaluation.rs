use chrono::Utc;
use quizforge_core::error::Result;
use quizforge_core::models::Evaluation;
use quizforge_core::processing::{evaluation_prompt, parse_evaluation};
use quizforge_llm::GenerateOptions;

use crate::state::AppState;

/// Service for grading a student answer against a model answer
pub struct EvaluationService;

impl EvaluationService {
    /// Ask the generator for a grade
    ///
    /// Only generator failures are errors. An unparseable reply becomes the
    /// fallback evaluation.
    pub async fn evaluate(
        state: &AppState,
        student_answer: &str,
        model_answer: &str,
    ) -> Result<Evaluation> {
        let prompt = evaluation_prompt(student_answer, model_answer);
        let raw = state.generator.generate(&prompt, &GenerateOptions::default()).await?;

        let evaluation = parse_evaluation(&raw, Utc::now());
        if evaluation.is_fallback() {
            tracing::warn!(
                model = %state.generator.model_name(),
                "Returning fallback evaluation for unparseable reply"
            );
        } else {
            tracing::info!(score = evaluation.score, "Answer evaluated");
        }

        Ok(evaluation)
    }
}
