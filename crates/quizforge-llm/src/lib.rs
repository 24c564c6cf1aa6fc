//! QuizForge LLM - Text generation ports and adapters
//!
//! This crate defines the `Generator` port used by the API for question
//! generation, answer evaluation, and search, along with adapters for the
//! Gemini and Ollama HTTP APIs.

pub mod gemini;
pub mod ollama;
pub mod ports;

// Re-export main types
pub use gemini::GeminiGenerator;
pub use ollama::OllamaGenerator;
pub use ports::{GenerateOptions, Generator};

use quizforge_core::config::{LayeredConfig, LlmProvider};
use quizforge_core::error::{QuizforgeError, Result};
use std::sync::Arc;

/// Build the generator selected by configuration
pub fn generator_from_config(config: &LayeredConfig) -> Result<Arc<dyn Generator>> {
    let base_url = config.resolved_base_url();
    let model = config.resolved_model();

    match config.llm_provider.value {
        LlmProvider::Gemini => {
            let api_key = config
                .gemini_api_key
                .value
                .clone()
                .ok_or_else(|| QuizforgeError::ConfigMissing { key: "GEMINI_API_KEY".to_string() })?;
            Ok(Arc::new(GeminiGenerator::new(base_url, model, api_key)))
        }
        LlmProvider::Ollama => Ok(Arc::new(OllamaGenerator::new(base_url, model))),
    }
}

/// Map a transport failure to a generator error
pub(crate) fn transport_error(err: reqwest::Error, service: &str, base_url: &str) -> QuizforgeError {
    if err.is_timeout() {
        QuizforgeError::GeneratorTimeout
    } else {
        QuizforgeError::GeneratorUnavailable {
            reason: format!("Failed to reach {}: {}", service, err),
            remediation: format!("Check network access to {}", base_url),
        }
    }
}
