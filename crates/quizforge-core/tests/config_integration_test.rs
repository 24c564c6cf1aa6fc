//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! Environment variables > Config file > Defaults

use quizforge_core::config::{ConfigSource, LayeredConfig, LlmProvider};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const VARS: &[&str] = &[
    "QUIZFORGE_PORT",
    "QUIZFORGE_CORS_ORIGINS",
    "QUIZFORGE_LLM_PROVIDER",
    "QUIZFORGE_LLM_MODEL",
    "QUIZFORGE_SEARCH_TIMEOUT_SECS",
    "QUIZFORGE_CONFIG",
    "GEMINI_API_KEY",
    "DATABASE_URL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();

    env::set_var("QUIZFORGE_PORT", "9090");
    env::set_var("QUIZFORGE_LLM_PROVIDER", "ollama");
    env::set_var("QUIZFORGE_CORS_ORIGINS", "http://localhost:3000, https://app.example.edu/");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
port = 8080
llm_provider = "gemini"
llm_model = "file-model"
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.port.value, 9090);
    assert_eq!(config.port.source, ConfigSource::Environment);
    assert_eq!(config.llm_provider.value, LlmProvider::Ollama);
    assert_eq!(
        config.cors_origins.value,
        vec!["http://localhost:3000".to_string(), "https://app.example.edu".to_string()]
    );
    // File value survives where the environment is silent
    assert_eq!(config.llm_model.value, "file-model");
    assert_eq!(config.llm_model.source, ConfigSource::File);
    assert_eq!(config.resolved_model(), "file-model");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();

    env::set_var("QUIZFORGE_PORT", "not-a-port");
    env::set_var("QUIZFORGE_LLM_PROVIDER", "openai");
    env::set_var("QUIZFORGE_SEARCH_TIMEOUT_SECS", "-1");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.port.value, 5002);
    assert_eq!(config.port.source, ConfigSource::Default);
    assert_eq!(config.llm_provider.value, LlmProvider::Gemini);
    assert_eq!(config.search_timeout_secs.value, 10);

    clear_env();
}

#[test]
#[serial]
fn test_secrets_come_from_environment() {
    clear_env();

    env::set_var("GEMINI_API_KEY", "test-key");
    env::set_var("DATABASE_URL", "postgresql://localhost/quizforge");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.gemini_api_key.value.as_deref(), Some("test-key"));
    assert_eq!(config.database_url.value.as_deref(), Some("postgresql://localhost/quizforge"));
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_load_uses_explicit_config_file() {
    clear_env();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "port = 7000").unwrap();
    env::set_var("QUIZFORGE_CONFIG", file.path());

    let config = LayeredConfig::load().unwrap();
    assert_eq!(config.port.value, 7000);
    assert_eq!(config.port.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_load_rejects_missing_explicit_config_file() {
    clear_env();

    env::set_var("QUIZFORGE_CONFIG", "/nonexistent/quizforge.toml");
    assert!(LayeredConfig::load().is_err());

    clear_env();
}

#[test]
fn test_configuration_precedence_order() {
    assert!(ConfigSource::Environment.precedence() > ConfigSource::File.precedence());
    assert!(ConfigSource::File.precedence() > ConfigSource::Default.precedence());
}
