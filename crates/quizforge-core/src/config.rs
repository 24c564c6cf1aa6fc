use crate::error::{QuizforgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file looked up in the working directory when `QUIZFORGE_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "quizforge.toml";

pub const DEFAULT_PORT: u16 = 5002;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Text generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    Ollama,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Gemini => f.write_str("gemini"),
            LlmProvider::Ollama => f.write_str("ollama"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = QuizforgeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_llm_provider(s)
    }
}

/// Layered configuration for the QuizForge server
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub host: ConfigValue<String>,
    pub port: ConfigValue<u16>,
    pub cors_origins: ConfigValue<Vec<String>>,
    pub max_upload_bytes: ConfigValue<usize>,
    pub llm_provider: ConfigValue<LlmProvider>,
    pub llm_model: ConfigValue<String>,
    pub llm_base_url: ConfigValue<Option<String>>,
    pub search_timeout_secs: ConfigValue<u64>,
    pub database_url: ConfigValue<Option<String>>,
    pub gemini_api_key: ConfigValue<Option<String>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            host: ConfigValue::new("0.0.0.0".to_string(), ConfigSource::Default),
            port: ConfigValue::new(DEFAULT_PORT, ConfigSource::Default),
            cors_origins: ConfigValue::new(
                vec![DEFAULT_CORS_ORIGIN.to_string()],
                ConfigSource::Default,
            ),
            max_upload_bytes: ConfigValue::new(DEFAULT_MAX_UPLOAD_BYTES, ConfigSource::Default),
            llm_provider: ConfigValue::new(LlmProvider::Gemini, ConfigSource::Default),
            llm_model: ConfigValue::new(DEFAULT_GEMINI_MODEL.to_string(), ConfigSource::Default),
            llm_base_url: ConfigValue::new(None, ConfigSource::Default),
            search_timeout_secs: ConfigValue::new(
                DEFAULT_SEARCH_TIMEOUT_SECS,
                ConfigSource::Default,
            ),
            database_url: ConfigValue::new(None, ConfigSource::Default),
            gemini_api_key: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Defaults, then the config file (if any), then the environment
    pub fn load() -> Result<Self> {
        let mut config = Self::with_defaults();
        if let Some(path) = config_file_path()? {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            config = config.load_from_file(&path)?;
        }
        Ok(config.load_from_env())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| QuizforgeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| QuizforgeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(host) = file_config.host {
            self.host.update(host, ConfigSource::File);
        }

        if let Some(port) = file_config.port {
            self.port.update(port, ConfigSource::File);
        }

        if let Some(origins) = file_config.cors_origins {
            self.cors_origins.update(origins, ConfigSource::File);
        }

        if let Some(max_upload_bytes) = file_config.max_upload_bytes {
            self.max_upload_bytes.update(max_upload_bytes, ConfigSource::File);
        }

        if let Some(provider) = file_config.llm_provider {
            self.llm_provider.update(provider, ConfigSource::File);
        }

        if let Some(model) = file_config.llm_model {
            self.llm_model.update(model, ConfigSource::File);
        }

        if let Some(base_url) = file_config.llm_base_url {
            self.llm_base_url.update(Some(base_url), ConfigSource::File);
        }

        if let Some(timeout) = file_config.search_timeout_secs {
            self.search_timeout_secs.update(timeout, ConfigSource::File);
        }

        if let Some(database_url) = file_config.database_url {
            self.database_url.update(Some(database_url), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // QUIZFORGE_HOST
        if let Ok(host) = env::var("QUIZFORGE_HOST") {
            self.host.update(host, ConfigSource::Environment);
        }

        // QUIZFORGE_PORT
        if let Ok(port_str) = env::var("QUIZFORGE_PORT") {
            match port_str.parse::<u16>() {
                Ok(port) => self.port.update(port, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid QUIZFORGE_PORT value '{}': expected port number",
                    port_str
                ),
            }
        }

        // QUIZFORGE_CORS_ORIGINS
        if let Ok(origins_str) = env::var("QUIZFORGE_CORS_ORIGINS") {
            let origins = parse_origin_list(&origins_str);
            if origins.is_empty() {
                tracing::warn!("Ignoring empty QUIZFORGE_CORS_ORIGINS");
            } else {
                self.cors_origins.update(origins, ConfigSource::Environment);
            }
        }

        // QUIZFORGE_MAX_UPLOAD_BYTES
        if let Ok(size_str) = env::var("QUIZFORGE_MAX_UPLOAD_BYTES") {
            match size_str.parse::<usize>() {
                Ok(size) => self.max_upload_bytes.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid QUIZFORGE_MAX_UPLOAD_BYTES value '{}': expected byte count",
                    size_str
                ),
            }
        }

        // QUIZFORGE_LLM_PROVIDER
        if let Ok(provider_str) = env::var("QUIZFORGE_LLM_PROVIDER") {
            match parse_llm_provider(&provider_str) {
                Ok(provider) => self.llm_provider.update(provider, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid QUIZFORGE_LLM_PROVIDER value '{}': expected gemini or ollama",
                    provider_str
                ),
            }
        }

        // QUIZFORGE_LLM_MODEL
        if let Ok(model) = env::var("QUIZFORGE_LLM_MODEL") {
            self.llm_model.update(model, ConfigSource::Environment);
        }

        // QUIZFORGE_LLM_BASE_URL
        if let Ok(base_url) = env::var("QUIZFORGE_LLM_BASE_URL") {
            self.llm_base_url.update(Some(base_url), ConfigSource::Environment);
        }

        // QUIZFORGE_SEARCH_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("QUIZFORGE_SEARCH_TIMEOUT_SECS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => self.search_timeout_secs.update(timeout, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid QUIZFORGE_SEARCH_TIMEOUT_SECS value '{}': expected seconds",
                    timeout_str
                ),
            }
        }

        // DATABASE_URL
        if let Ok(database_url) = env::var("DATABASE_URL") {
            if !database_url.trim().is_empty() {
                self.database_url.update(Some(database_url), ConfigSource::Environment);
            }
        }

        // GEMINI_API_KEY
        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            if !api_key.trim().is_empty() {
                self.gemini_api_key.update(Some(api_key), ConfigSource::Environment);
            }
        }

        self
    }

    /// Model name, falling back to the provider's default when not configured
    pub fn resolved_model(&self) -> &str {
        match (self.llm_model.source, self.llm_provider.value) {
            (ConfigSource::Default, LlmProvider::Ollama) => DEFAULT_OLLAMA_MODEL,
            _ => &self.llm_model.value,
        }
    }

    /// Generator base URL, falling back to the provider's public endpoint
    pub fn resolved_base_url(&self) -> &str {
        match (&self.llm_base_url.value, self.llm_provider.value) {
            (Some(url), _) => url,
            (None, LlmProvider::Gemini) => DEFAULT_GEMINI_URL,
            (None, LlmProvider::Ollama) => DEFAULT_OLLAMA_URL,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host.value, self.port.value)
    }

    /// Check cross-field requirements
    pub fn validate(&self) -> Result<()> {
        if self.cors_origins.value.is_empty() {
            return Err(QuizforgeError::ConfigInvalid {
                key: "cors_origins".to_string(),
                reason: "at least one origin is required".to_string(),
            });
        }

        if self.max_upload_bytes.value == 0 {
            return Err(QuizforgeError::ConfigInvalid {
                key: "max_upload_bytes".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.search_timeout_secs.value == 0 {
            return Err(QuizforgeError::ConfigInvalid {
                key: "search_timeout_secs".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.llm_provider.value == LlmProvider::Gemini && self.gemini_api_key.value.is_none() {
            return Err(QuizforgeError::ConfigMissing { key: "GEMINI_API_KEY".to_string() });
        }

        Ok(())
    }

    /// Get all configuration values as a map for inspection; secrets are redacted
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert("host".to_string(), (self.host.value.clone(), self.host.source));
        map.insert("port".to_string(), (self.port.value.to_string(), self.port.source));
        map.insert(
            "cors_origins".to_string(),
            (self.cors_origins.value.join(","), self.cors_origins.source),
        );
        map.insert(
            "max_upload_bytes".to_string(),
            (self.max_upload_bytes.value.to_string(), self.max_upload_bytes.source),
        );
        map.insert(
            "llm_provider".to_string(),
            (self.llm_provider.value.to_string(), self.llm_provider.source),
        );
        map.insert("llm_model".to_string(), (self.resolved_model().to_string(), self.llm_model.source));
        map.insert(
            "llm_base_url".to_string(),
            (self.resolved_base_url().to_string(), self.llm_base_url.source),
        );
        map.insert(
            "search_timeout_secs".to_string(),
            (self.search_timeout_secs.value.to_string(), self.search_timeout_secs.source),
        );
        map.insert(
            "database_url".to_string(),
            (redact(self.database_url.value.as_deref()), self.database_url.source),
        );
        map.insert(
            "gemini_api_key".to_string(),
            (redact(self.gemini_api_key.value.as_deref()), self.gemini_api_key.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    cors_origins: Option<Vec<String>>,
    max_upload_bytes: Option<usize>,
    llm_provider: Option<LlmProvider>,
    llm_model: Option<String>,
    llm_base_url: Option<String>,
    search_timeout_secs: Option<u64>,
    database_url: Option<String>,
}

/// Resolve which config file to read, if any
fn config_file_path() -> Result<Option<PathBuf>> {
    if let Ok(explicit) = env::var("QUIZFORGE_CONFIG") {
        let path = PathBuf::from(explicit);
        if !path.exists() {
            return Err(QuizforgeError::ConfigInvalid {
                key: "QUIZFORGE_CONFIG".to_string(),
                reason: format!("config file not found: {}", path.display()),
            });
        }
        return Ok(Some(path));
    }

    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    Ok(default.exists().then_some(default))
}

/// Parse LLM provider from string
pub fn parse_llm_provider(s: &str) -> Result<LlmProvider> {
    match s.trim().to_lowercase().as_str() {
        "gemini" | "google" => Ok(LlmProvider::Gemini),
        "ollama" => Ok(LlmProvider::Ollama),
        _ => Err(QuizforgeError::ConfigInvalid {
            key: "llm_provider".to_string(),
            reason: format!("Invalid LLM provider: {}. Use gemini or ollama", s),
        }),
    }
}

/// Split a comma separated origin list, dropping blanks
pub fn parse_origin_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}

fn redact(value: Option<&str>) -> String {
    match value {
        Some(_) => "<set>".to_string(),
        None => "<unset>".to_string(),
    }
}
