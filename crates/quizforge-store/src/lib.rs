//! QuizForge Store - Storage ports and adapters
//!
//! This crate defines the discussion thread storage port and provides
//! in-memory and PostgreSQL implementations.

pub mod memory;
pub mod ports;
pub mod postgres;

pub use memory::MemoryThreadStore;
pub use ports::ThreadStore;
