use async_trait::async_trait;
use quizforge_core::error::{QuizforgeError, Result};
use serde::{Deserialize, Serialize};

use crate::ports::{GenerateOptions, Generator};
use crate::transport_error;

/// Ollama generator for locally hosted models
pub struct OllamaGenerator {
    /// Base URL for Ollama API (e.g., "http://localhost:11434")
    base_url: String,

    /// Model name to use for generation
    model: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaGenerator {
    /// Create a new Ollama generator
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create with default localhost URL
    pub fn localhost(model: impl Into<String>) -> Self {
        Self::new("http://localhost:11434", model)
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String> {
        let request = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: options.temperature.map(|temperature| OllamaOptions { temperature }),
        };

        tracing::debug!(model = %self.model, "Sending prompt to Ollama");

        let mut builder =
            self.client.post(format!("{}/api/generate", self.base_url)).json(&request);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| match transport_error(e, "Ollama", &self.base_url) {
            QuizforgeError::GeneratorUnavailable { reason, .. } => QuizforgeError::GeneratorUnavailable {
                reason,
                remediation: format!(
                    "Ensure Ollama is running at {} and the model '{}' is available. \
                     Run 'ollama pull {}' to download the model.",
                    self.base_url, self.model, self.model
                ),
            },
            other => other,
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(QuizforgeError::GeneratorUnavailable {
                reason: format!("Ollama API error ({}): {}", status, error_text),
                remediation: format!(
                    "Check that the model '{}' is available. Run 'ollama list' to see installed models.",
                    self.model
                ),
            });
        }

        let body: OllamaGenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                QuizforgeError::GeneratorTimeout
            } else {
                QuizforgeError::Serialization(format!("Failed to parse Ollama response: {}", e))
            }
        })?;

        if body.response.trim().is_empty() {
            return Err(QuizforgeError::EmptyGeneration);
        }

        tracing::debug!(response_chars = body.response.len(), "Received response from Ollama");
        Ok(body.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Request body for Ollama generate API
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: String,
}
