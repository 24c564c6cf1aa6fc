//! QuizForge Core - Domain models, configuration, and document processing
//!
//! This crate contains the domain logic shared by the QuizForge backend:
//! question/evaluation/thread models, PDF text extraction, prompt
//! construction, and parsing of LLM responses.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod processing;

pub use error::{QuizforgeError, Result};
