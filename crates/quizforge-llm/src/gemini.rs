use async_trait::async_trait;
use quizforge_core::error::{QuizforgeError, Result};
use serde::{Deserialize, Serialize};

use crate::ports::{GenerateOptions, Generator};
use crate::transport_error;

/// Google Gemini generator using the `generateContent` REST endpoint
pub struct GeminiGenerator {
    /// Base URL of the Generative Language API
    base_url: String,

    /// Model name, e.g. "gemini-1.5-flash-latest"
    model: String,

    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl GeminiGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
            generation_config: options
                .temperature
                .map(|temperature| GenerationConfig { temperature }),
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending prompt to Gemini");

        let mut builder = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let response =
            builder.send().await.map_err(|e| transport_error(e, "Gemini", &self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(QuizforgeError::GeneratorUnavailable {
                reason: format!("Gemini API error ({}): {}", status, error_text),
                remediation: format!(
                    "Check GEMINI_API_KEY and that the model '{}' is available",
                    self.model
                ),
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                QuizforgeError::GeneratorTimeout
            } else {
                QuizforgeError::Serialization(format!("Failed to parse Gemini response: {}", e))
            }
        })?;

        let text = body.into_text()?;
        tracing::debug!(response_chars = text.len(), "Received response from Gemini");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Request body for the generateContent API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Response from the generateContent API
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(QuizforgeError::GeneratorUnavailable {
                reason: format!("Prompt blocked by Gemini: {}", reason),
                remediation: "Rephrase or shorten the request".to_string(),
            });
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(QuizforgeError::EmptyGeneration);
        }
        Ok(text)
    }
}
