//! LLM port definitions

use async_trait::async_trait;
use quizforge_core::error::Result;
use std::time::Duration;

/// Per-call generation settings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerateOptions {
    /// Abort the request after this long
    pub timeout: Option<Duration>,

    /// Sampling temperature; the provider default applies when unset
    pub temperature: Option<f32>,
}

impl GenerateOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Port for text generation
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for `prompt`
    ///
    /// # Returns
    /// The generated text. Implementations return
    /// `QuizforgeError::EmptyGeneration` rather than an empty string.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String>;

    /// Get the name/identifier of the generation model
    fn model_name(&self) -> &str;
}
