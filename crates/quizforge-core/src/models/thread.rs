use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{QuizforgeError, Result};

/// A discussion thread with its messages in posting order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Thread {
    /// Build a fresh thread with a new id and no messages
    pub fn create(new: NewThread, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            messages: Vec::new(),
            created_at: stored_precision(created_at),
        }
    }

    pub fn find_message(&self, message_id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == message_id)
    }
}

/// A message posted to a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub pinned: bool,
}

impl Message {
    pub fn create(new: NewMessage, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: new.text,
            sender: new.sender,
            timestamp: stored_precision(timestamp),
            pinned: false,
        }
    }
}

/// Timestamps keep microseconds, the resolution of a `TIMESTAMPTZ` column
fn stored_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

/// Validated input for a new thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub description: String,
}

impl NewThread {
    pub fn new(title: &str, description: &str) -> Result<Self> {
        Ok(Self {
            title: required("title", title)?,
            description: required("description", description)?,
        })
    }
}

/// Validated input for a new message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub text: String,
    pub sender: String,
}

impl NewMessage {
    pub fn new(text: &str, sender: &str) -> Result<Self> {
        Ok(Self {
            text: required("text", text)?,
            sender: required("sender", sender)?,
        })
    }
}

fn required(key: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QuizforgeError::InvalidParameter {
            key: key.to_string(),
            reason: "cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
