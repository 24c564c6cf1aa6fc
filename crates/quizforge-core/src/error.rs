//! Error types for QuizForge

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizforgeError {
    // Document errors
    #[error("Failed to extract {format} document: {reason}")]
    DocumentExtraction { format: String, reason: String },

    #[error("Invalid page range '{0}': expected 'all' or '<start>-<end>'")]
    InvalidPageRange(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidParameter { key: String, reason: String },

    // Generator errors
    #[error("Generator unavailable: {reason}. Try: {remediation}")]
    GeneratorUnavailable { reason: String, remediation: String },

    #[error("Generator request timed out")]
    GeneratorTimeout,

    #[error("Generator returned an empty response")]
    EmptyGeneration,

    // Forum errors
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, QuizforgeError>;
