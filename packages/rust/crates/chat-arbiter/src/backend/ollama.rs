//! Ollama HTTP client: `POST /api/generate`, `GET /api/tags`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{BackendConfig, BackendError, GenerateReply, InferenceBackend};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagsModel>,
}

#[derive(Debug, Deserialize)]
struct TagsModel {
    name: String,
}

/// Ollama backend bound to one [`BackendConfig`].
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: Client,
    config: BackendConfig,
}

impl OllamaBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Share one connection pool across backends.
    pub fn with_client(client: Client, config: BackendConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl InferenceBackend for OllamaBackend {
    fn config(&self) -> &BackendConfig {
        &self.config
    }

    async fn generate(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<GenerateReply, BackendError> {
        let url = self.config.generate_url();
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };
        let started = Instant::now();
        let res = self
            .client
            .post(&url)
            .json(&body)
            .timeout(timeout)
            .send()
            .await?;
        let status = res.status();
        tracing::debug!(
            event = "chat.backend.generate.completed",
            url,
            model = %self.config.model,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis(),
            "ollama generate call completed"
        );
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(BackendError::Http {
                status: status.as_u16(),
                body,
            });
        }
        let text = res.text().await?;
        serde_json::from_str(&text).map_err(|error| {
            BackendError::MalformedResponse(format!("{error}; body: {text}"))
        })
    }

    async fn list_models(&self, timeout: Duration) -> Result<Vec<String>, BackendError> {
        let res = self
            .client
            .get(self.config.tags_url())
            .timeout(timeout)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(BackendError::Http {
                status: status.as_u16(),
                body,
            });
        }
        let tags: TagsResponse = res.json().await?;
        Ok(tags.models.into_iter().map(|model| model.name).collect())
    }
}
