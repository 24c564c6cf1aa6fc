//! In-memory storage implementation for development and testing.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. For production workloads, use the PostgreSQL backend.

use async_trait::async_trait;
use chrono::Utc;
use quizforge_core::error::{QuizforgeError, Result};
use quizforge_core::models::{Message, NewMessage, NewThread, Thread};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::ThreadStore;

/// In-memory implementation of ThreadStore
#[derive(Debug, Clone, Default)]
pub struct MemoryThreadStore {
    threads: Arc<RwLock<HashMap<String, Thread>>>,
    reports: Arc<RwLock<HashMap<String, u32>>>,
}

impl MemoryThreadStore {
    /// Create a new in-memory thread store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored threads
    pub fn len(&self) -> usize {
        self.threads.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ThreadStore for MemoryThreadStore {
    async fn list_threads(&self) -> Result<Vec<Thread>> {
        let threads = self.threads.read().unwrap();
        let mut list: Vec<Thread> = threads.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn create_thread(&self, new: NewThread) -> Result<Thread> {
        let thread = Thread::create(new, Utc::now());
        let mut threads = self.threads.write().unwrap();
        threads.insert(thread.id.clone(), thread.clone());
        Ok(thread)
    }

    async fn get_thread(&self, id: &str) -> Result<Option<Thread>> {
        let threads = self.threads.read().unwrap();
        Ok(threads.get(id).cloned())
    }

    async fn delete_thread(&self, id: &str) -> Result<bool> {
        let removed = self.threads.write().unwrap().remove(id);
        match removed {
            Some(thread) => {
                let mut reports = self.reports.write().unwrap();
                for message in &thread.messages {
                    reports.remove(&message.id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_message(&self, thread_id: &str, new: NewMessage) -> Result<Option<Message>> {
        let mut threads = self.threads.write().unwrap();
        let Some(thread) = threads.get_mut(thread_id) else {
            return Ok(None);
        };

        let message = Message::create(new, Utc::now());
        thread.messages.push(message.clone());
        Ok(Some(message))
    }

    async fn get_message(&self, thread_id: &str, message_id: &str) -> Result<Message> {
        let threads = self.threads.read().unwrap();
        let thread = threads
            .get(thread_id)
            .ok_or_else(|| QuizforgeError::ThreadNotFound(thread_id.to_string()))?;
        thread
            .find_message(message_id)
            .cloned()
            .ok_or_else(|| QuizforgeError::MessageNotFound(message_id.to_string()))
    }

    async fn record_report(&self, thread_id: &str, message_id: &str) -> Result<u32> {
        // Hold the thread lock so a concurrent delete cannot orphan the count
        let threads = self.threads.read().unwrap();
        let thread = threads
            .get(thread_id)
            .ok_or_else(|| QuizforgeError::ThreadNotFound(thread_id.to_string()))?;
        if thread.find_message(message_id).is_none() {
            return Err(QuizforgeError::MessageNotFound(message_id.to_string()));
        }

        let mut reports = self.reports.write().unwrap();
        let count = reports.entry(message_id.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_thread(title: &str) -> NewThread {
        NewThread::new(title, "description").unwrap()
    }

    fn new_message(text: &str) -> NewMessage {
        NewMessage::new(text, "alice").unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_thread() {
        let store = MemoryThreadStore::new();
        let thread = store.create_thread(new_thread("Calculus")).await.unwrap();

        let fetched = store.get_thread(&thread.id).await.unwrap().unwrap();
        assert_eq!(fetched, thread);
        assert!(fetched.messages.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_thread() {
        let store = MemoryThreadStore::new();
        assert!(store.get_thread("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_threads_ordered_by_creation() {
        let store = MemoryThreadStore::new();
        for title in ["first", "second", "third"] {
            store.create_thread(new_thread(title)).await.unwrap();
        }

        let listed = store.list_threads().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.windows(2).all(|w| (&w[0].created_at, &w[0].id) <= (&w[1].created_at, &w[1].id)));
    }

    #[tokio::test]
    async fn test_delete_thread() {
        let store = MemoryThreadStore::new();
        let thread = store.create_thread(new_thread("temp")).await.unwrap();

        assert!(store.delete_thread(&thread.id).await.unwrap());
        assert!(!store.delete_thread(&thread.id).await.unwrap());
        assert!(store.get_thread(&thread.id).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_message_preserves_order() {
        let store = MemoryThreadStore::new();
        let thread = store.create_thread(new_thread("chat")).await.unwrap();

        let a = store.add_message(&thread.id, new_message("one")).await.unwrap().unwrap();
        let b = store.add_message(&thread.id, new_message("two")).await.unwrap().unwrap();
        assert!(!a.pinned);

        let fetched = store.get_thread(&thread.id).await.unwrap().unwrap();
        let ids: Vec<&str> = fetched.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str(), b.id.as_str()]);
    }

    #[tokio::test]
    async fn test_add_message_to_missing_thread() {
        let store = MemoryThreadStore::new();
        assert!(store.add_message("missing", new_message("hi")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_message_errors() {
        let store = MemoryThreadStore::new();
        let thread = store.create_thread(new_thread("chat")).await.unwrap();

        assert!(matches!(
            store.get_message("missing", "m").await,
            Err(QuizforgeError::ThreadNotFound(_))
        ));
        assert!(matches!(
            store.get_message(&thread.id, "m").await,
            Err(QuizforgeError::MessageNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_record_report_counts() {
        let store = MemoryThreadStore::new();
        let thread = store.create_thread(new_thread("chat")).await.unwrap();
        let message = store.add_message(&thread.id, new_message("spam")).await.unwrap().unwrap();

        assert_eq!(store.record_report(&thread.id, &message.id).await.unwrap(), 1);
        assert_eq!(store.record_report(&thread.id, &message.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_record_report_requires_message_in_thread() {
        let store = MemoryThreadStore::new();
        let a = store.create_thread(new_thread("a")).await.unwrap();
        let b = store.create_thread(new_thread("b")).await.unwrap();
        let message = store.add_message(&a.id, new_message("hi")).await.unwrap().unwrap();

        assert!(matches!(
            store.record_report(&b.id, &message.id).await,
            Err(QuizforgeError::MessageNotFound(_))
        ));
        assert!(matches!(
            store.record_report("missing", &message.id).await,
            Err(QuizforgeError::ThreadNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_messages() {
        let store = MemoryThreadStore::new();
        let thread = store.create_thread(new_thread("busy")).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            let id = thread.id.clone();
            handles.push(tokio::spawn(async move {
                store.add_message(&id, new_message(&format!("msg {}", i))).await.unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }

        let fetched = store.get_thread(&thread.id).await.unwrap().unwrap();
        assert_eq!(fetched.messages.len(), 20);
    }
}
