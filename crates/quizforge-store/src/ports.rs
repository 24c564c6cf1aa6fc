use async_trait::async_trait;
use quizforge_core::error::Result;
use quizforge_core::models::{Message, NewMessage, NewThread, Thread};

/// Port for discussion thread storage
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// List all threads with their messages, oldest first
    async fn list_threads(&self) -> Result<Vec<Thread>>;

    /// Persist a new thread and return it with its assigned id
    async fn create_thread(&self, new: NewThread) -> Result<Thread>;

    /// Retrieve a thread by id
    async fn get_thread(&self, id: &str) -> Result<Option<Thread>>;

    /// Delete a thread and its messages
    ///
    /// Returns `false` when no thread had this id.
    async fn delete_thread(&self, id: &str) -> Result<bool>;

    /// Append a message to a thread
    ///
    /// Returns `None` when the thread does not exist.
    async fn add_message(&self, thread_id: &str, new: NewMessage) -> Result<Option<Message>>;

    /// Look up one message of a thread
    ///
    /// Fails with `ThreadNotFound` or `MessageNotFound`.
    async fn get_message(&self, thread_id: &str, message_id: &str) -> Result<Message>;

    /// Record a moderation report against a message
    ///
    /// Returns how many times the message has now been reported.
    async fn record_report(&self, thread_id: &str, message_id: &str) -> Result<u32>;

    /// Verify the backend is reachable
    async fn health_check(&self) -> Result<()>;

    /// Short backend name for diagnostics
    fn backend_name(&self) -> &'static str;
}
