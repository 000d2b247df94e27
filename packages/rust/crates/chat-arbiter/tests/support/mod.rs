//! Shared test doubles: a scripted in-process backend and a mock Ollama HTTP server.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chat_arbiter::{
    BackendConfig, BackendError, GenerateReply, GeneratorPolicy, InferenceBackend, ProbePolicy,
};
use serde_json::Value;

/// Probe policy with no backoff so retry tests run instantly.
pub fn fast_probe_policy(max_attempts: u32) -> ProbePolicy {
    ProbePolicy {
        max_attempts,
        attempt_timeout: Duration::from_secs(2),
        loading_backoff: Duration::ZERO,
        failure_backoff: Duration::ZERO,
    }
}

pub fn fast_generator_policy() -> GeneratorPolicy {
    GeneratorPolicy {
        probe: fast_probe_policy(3),
        generate_timeout: Duration::from_secs(2),
    }
}

pub fn reply(response: Option<&str>, done_reason: Option<&str>) -> GenerateReply {
    GenerateReply {
        response: response.map(ToString::to_string),
        done_reason: done_reason.map(ToString::to_string),
    }
}

pub fn ready_reply() -> Result<GenerateReply, BackendError> {
    Ok(reply(Some("你好！"), Some("stop")))
}

pub fn loading_reply() -> Result<GenerateReply, BackendError> {
    Ok(reply(Some(""), Some("load")))
}

/// In-process backend returning scripted generate outcomes in order.
pub struct ScriptedBackend {
    config: BackendConfig,
    script: Mutex<VecDeque<Result<GenerateReply, BackendError>>>,
    models: Mutex<Option<Result<Vec<String>, BackendError>>>,
    prompts: Mutex<Vec<String>>,
    generate_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Result<GenerateReply, BackendError>>) -> Self {
        Self {
            config: BackendConfig::new("http://scripted.invalid", "scripted-model"),
            script: Mutex::new(script.into()),
            models: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            generate_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_models(self, models: Result<Vec<String>, BackendError>) -> Self {
        if let Ok(mut slot) = self.models.lock() {
            *slot = Some(models);
        }
        self
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    fn config(&self) -> &BackendConfig {
        &self.config
    }

    async fn generate(
        &self,
        prompt: &str,
        _timeout: Duration,
    ) -> Result<GenerateReply, BackendError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| Err(BackendError::Other("script exhausted".to_string())))
    }

    async fn list_models(&self, _timeout: Duration) -> Result<Vec<String>, BackendError> {
        self.models
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .unwrap_or_else(|| Err(BackendError::Connection("no models scripted".to_string())))
    }
}

/// One canned HTTP answer from the mock Ollama server.
#[derive(Clone)]
pub struct MockAnswer {
    pub status: StatusCode,
    pub body: Value,
    pub delay: Duration,
}

impl MockAnswer {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

#[derive(Clone)]
struct MockState {
    generate: Arc<Mutex<VecDeque<MockAnswer>>>,
    tags: MockAnswer,
    generate_bodies: Arc<Mutex<Vec<Value>>>,
    generate_calls: Arc<AtomicUsize>,
}

pub struct MockOllama {
    pub base_url: String,
    pub generate_calls: Arc<AtomicUsize>,
    generate_bodies: Arc<Mutex<Vec<Value>>>,
}

impl MockOllama {
    pub fn generate_bodies(&self) -> Vec<Value> {
        self.generate_bodies
            .lock()
            .map(|b| b.clone())
            .unwrap_or_default()
    }
}

async fn handle_generate(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.generate_calls.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut bodies) = state.generate_bodies.lock() {
        bodies.push(body);
    }
    let answer = state
        .generate
        .lock()
        .ok()
        .and_then(|mut queue| queue.pop_front())
        .unwrap_or_else(|| {
            MockAnswer::status(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "mock script exhausted"}),
            )
        });
    tokio::time::sleep(answer.delay).await;
    (answer.status, Json(answer.body))
}

async fn handle_tags(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    tokio::time::sleep(state.tags.delay).await;
    (state.tags.status, Json(state.tags.body.clone()))
}

/// Spawn a mock Ollama on `127.0.0.1:0`. `None` when local bind is not permitted.
pub async fn spawn_mock_ollama(
    generate: Vec<MockAnswer>,
    tags: MockAnswer,
) -> Result<Option<MockOllama>> {
    let generate_calls = Arc::new(AtomicUsize::new(0));
    let generate_bodies = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        generate: Arc::new(Mutex::new(generate.into())),
        tags,
        generate_bodies: Arc::clone(&generate_bodies),
        generate_calls: Arc::clone(&generate_calls),
    };
    let app = Router::new()
        .route("/api/generate", post(handle_generate))
        .route("/api/tags", get(handle_tags))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping mock ollama tests: local socket bind is not permitted");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(Some(MockOllama {
        base_url: format!("http://{addr}"),
        generate_calls,
        generate_bodies,
    }))
}

/// Base URL of a local port with nothing listening.
pub async fn closed_port_url() -> Result<Option<String>> {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping connection failure tests: local socket bind is not permitted");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Some(format!("http://{addr}")))
}

/// Raw HTTP server that answers every connection with `status_line` and a
/// body shorter than its declared `Content-Length`, then hangs up.
pub async fn spawn_truncated_body_server(status_line: &'static str) -> Result<Option<String>> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping truncated body tests: local socket bind is not permitted");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: 1000\r\n\r\n{{\"error\":"
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    Ok(Some(format!("http://{addr}")))
}
