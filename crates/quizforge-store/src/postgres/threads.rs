use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quizforge_core::error::{QuizforgeError, Result};
use quizforge_core::models::{Message, NewMessage, NewThread, Thread};
use sqlx::postgres::PgRow;
use sqlx::Row;
use std::collections::HashMap;

use super::{storage_error, PostgresStore};
use crate::ports::ThreadStore;

fn thread_from_row(row: &PgRow) -> Thread {
    Thread {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        messages: Vec::new(),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}

fn message_from_row(row: &PgRow) -> Message {
    Message {
        id: row.get("id"),
        text: row.get("text"),
        sender: row.get("sender"),
        timestamp: row.get::<DateTime<Utc>, _>("created_at"),
        pinned: row.get("pinned"),
    }
}

impl PostgresStore {
    async fn thread_exists(&self, id: &str) -> Result<bool> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM threads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("look up thread", e))?;
        Ok(row.is_some())
    }

    async fn message_in_thread(&self, thread_id: &str, message_id: &str) -> Result<Option<Message>> {
        let row = sqlx::query(
            r#"
            SELECT id, text, sender, pinned, created_at
            FROM messages
            WHERE thread_id = $1 AND id = $2
            "#,
        )
        .bind(thread_id)
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("get message", e))?;

        Ok(row.as_ref().map(message_from_row))
    }
}

#[async_trait]
impl ThreadStore for PostgresStore {
    async fn list_threads(&self) -> Result<Vec<Thread>> {
        let thread_rows = sqlx::query(
            r#"
            SELECT id, title, description, created_at
            FROM threads
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list threads", e))?;

        let message_rows = sqlx::query(
            r#"
            SELECT thread_id, id, text, sender, pinned, created_at
            FROM messages
            ORDER BY thread_id, position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list messages", e))?;

        let mut by_thread: HashMap<String, Vec<Message>> = HashMap::new();
        for row in &message_rows {
            let thread_id: String = row.get("thread_id");
            by_thread.entry(thread_id).or_default().push(message_from_row(row));
        }

        Ok(thread_rows
            .iter()
            .map(|row| {
                let mut thread = thread_from_row(row);
                thread.messages = by_thread.remove(&thread.id).unwrap_or_default();
                thread
            })
            .collect())
    }

    async fn create_thread(&self, new: NewThread) -> Result<Thread> {
        let thread = Thread::create(new, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO threads (id, title, description, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&thread.id)
        .bind(&thread.title)
        .bind(&thread.description)
        .bind(thread.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("create thread", e))?;

        Ok(thread)
    }

    async fn get_thread(&self, id: &str) -> Result<Option<Thread>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, created_at
            FROM threads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("get thread", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut thread = thread_from_row(&row);

        let message_rows = sqlx::query(
            r#"
            SELECT id, text, sender, pinned, created_at
            FROM messages
            WHERE thread_id = $1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("get thread messages", e))?;

        thread.messages = message_rows.iter().map(message_from_row).collect();
        Ok(Some(thread))
    }

    async fn delete_thread(&self, id: &str) -> Result<bool> {
        // Messages and report counts go with the thread through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete thread", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_message(&self, thread_id: &str, new: NewMessage) -> Result<Option<Message>> {
        let message = Message::create(new, Utc::now());

        let result = sqlx::query(
            r#"
            INSERT INTO messages (id, thread_id, text, sender, pinned, created_at)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE EXISTS (SELECT 1 FROM threads WHERE id = $2)
            "#,
        )
        .bind(&message.id)
        .bind(thread_id)
        .bind(&message.text)
        .bind(&message.sender)
        .bind(message.pinned)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("add message", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(message))
    }

    async fn get_message(&self, thread_id: &str, message_id: &str) -> Result<Message> {
        if !self.thread_exists(thread_id).await? {
            return Err(QuizforgeError::ThreadNotFound(thread_id.to_string()));
        }
        self.message_in_thread(thread_id, message_id)
            .await?
            .ok_or_else(|| QuizforgeError::MessageNotFound(message_id.to_string()))
    }

    async fn record_report(&self, thread_id: &str, message_id: &str) -> Result<u32> {
        // Counts only a message that still belongs to the thread
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            INSERT INTO message_reports (message_id, report_count, last_reported_at)
            SELECT id, 1, NOW()
            FROM messages
            WHERE id = $1 AND thread_id = $2
            ON CONFLICT (message_id)
            DO UPDATE SET report_count = message_reports.report_count + 1,
                          last_reported_at = NOW()
            RETURNING report_count
            "#,
        )
        .bind(message_id)
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await
        .or_else(|e| {
            // The message was deleted between the select and the insert
            if let sqlx::Error::Database(db) = &e {
                if db.is_foreign_key_violation() {
                    return Ok(None);
                }
            }
            Err(storage_error("record report", e))
        })?;

        if let Some((count,)) = row {
            return Ok(count.max(0) as u32);
        }
        if !self.thread_exists(thread_id).await? {
            return Err(QuizforgeError::ThreadNotFound(thread_id.to_string()));
        }
        Err(QuizforgeError::MessageNotFound(message_id.to_string()))
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| QuizforgeError::Storage(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
