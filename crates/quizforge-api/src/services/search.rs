use quizforge_core::error::{QuizforgeError, Result};
use quizforge_core::processing::search_prompt;
use quizforge_llm::GenerateOptions;

use crate::state::AppState;

pub const MIN_QUERY_CHARS: usize = 3;

/// Service for answering academic search queries
pub struct SearchService;

impl SearchService {
    /// Answer `query` within the configured search timeout
    pub async fn search(state: &AppState, query: &str) -> Result<String> {
        let prompt = search_prompt(query);
        let options = GenerateOptions::default().with_timeout(state.search_timeout);

        let answer = tokio::time::timeout(
            state.search_timeout,
            state.generator.generate(&prompt, &options),
        )
        .await
        .map_err(|_| QuizforgeError::GeneratorTimeout)??;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(QuizforgeError::EmptyGeneration);
        }
        Ok(answer.to_string())
    }
}
