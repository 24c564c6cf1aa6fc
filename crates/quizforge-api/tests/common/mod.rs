//! Shared helpers for driving the router in-process

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use quizforge_api::{create_router, ApiConfig, AppState};
use quizforge_core::error::{QuizforgeError, Result};
use quizforge_core::models::{Message, NewMessage, NewThread, Thread};
use quizforge_llm::{GenerateOptions, Generator};
use quizforge_store::{MemoryThreadStore, ThreadStore};
use serde_json::Value;
use tower::ServiceExt;

pub const BOUNDARY: &str = "quizforge-test-boundary";

/// One canned generator outcome
pub enum Reply {
    Text(String),
    Slow(Duration, String),
    Timeout,
    Unavailable,
    Empty,
}

/// Generator that replays scripted outcomes and records prompts
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Reply::Text(text.to_string())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, _options: &GenerateOptions) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Slow(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Some(Reply::Timeout) => Err(QuizforgeError::GeneratorTimeout),
            Some(Reply::Empty) => Err(QuizforgeError::EmptyGeneration),
            Some(Reply::Unavailable) | None => Err(QuizforgeError::GeneratorUnavailable {
                reason: "scripted outage".to_string(),
                remediation: "none".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Store whose backend is unreachable
pub struct DownStore;

fn down() -> QuizforgeError {
    QuizforgeError::Storage("connection refused".to_string())
}

#[async_trait]
impl ThreadStore for DownStore {
    async fn list_threads(&self) -> Result<Vec<Thread>> {
        Err(down())
    }

    async fn create_thread(&self, _new: NewThread) -> Result<Thread> {
        Err(down())
    }

    async fn get_thread(&self, _id: &str) -> Result<Option<Thread>> {
        Err(down())
    }

    async fn delete_thread(&self, _id: &str) -> Result<bool> {
        Err(down())
    }

    async fn add_message(&self, _thread_id: &str, _new: NewMessage) -> Result<Option<Message>> {
        Err(down())
    }

    async fn get_message(&self, _thread_id: &str, _message_id: &str) -> Result<Message> {
        Err(down())
    }

    async fn record_report(&self, _thread_id: &str, _message_id: &str) -> Result<u32> {
        Err(down())
    }

    async fn health_check(&self) -> Result<()> {
        Err(down())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Body limit of the test router
pub const TEST_BODY_LIMIT: usize = 64 * 1024;

pub fn test_config() -> ApiConfig {
    ApiConfig {
        search_timeout: Duration::from_millis(200),
        max_upload_bytes: TEST_BODY_LIMIT,
        ..ApiConfig::default()
    }
}

pub fn app_with(generator: Arc<ScriptedGenerator>) -> Router {
    app_with_store(generator, Arc::new(MemoryThreadStore::new()))
}

pub fn app_with_store(generator: Arc<ScriptedGenerator>, store: Arc<dyn ThreadStore>) -> Router {
    let config = test_config();
    let state = Arc::new(AppState::new(generator, store, config.search_timeout));
    create_router(state, &config)
}

pub fn app() -> Router {
    app_with(ScriptedGenerator::new(Vec::new()))
}

/// Send a request and decode the JSON response body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

/// A multipart form part
pub struct Part {
    pub name: &'static str,
    pub filename: Option<&'static str>,
    pub content: Vec<u8>,
}

impl Part {
    pub fn text(name: &'static str, value: &str) -> Self {
        Self {
            name,
            filename: None,
            content: value.as_bytes().to_vec(),
        }
    }

    pub fn file(name: &'static str, filename: &'static str, content: Vec<u8>) -> Self {
        Self {
            name,
            filename: Some(filename),
            content,
        }
    }
}

pub fn post_multipart(uri: &str, parts: Vec<Part>) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/pdf\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Build a one-page PDF that shows `text` in Helvetica
pub fn single_page_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, object).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    pdf
}
