//! Inference backend abstraction and the Ollama HTTP implementation.

mod config;
mod error;
mod ollama;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

pub use config::{BackendConfig, BackendSelector, DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL};
pub use error::BackendError;
pub use ollama::OllamaBackend;

/// `done_reason` value meaning the model weights are still loading.
pub const LOADING_DONE_REASON: &str = "load";

/// Successful (2xx) non-streaming generate response. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done_reason: Option<String>,
}

impl GenerateReply {
    /// Backend answered but has not finished loading the model.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.done_reason.as_deref() == Some(LOADING_DONE_REASON)
    }
}

/// One whole-response inference endpoint.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Endpoint + model this backend is bound to.
    fn config(&self) -> &BackendConfig;

    /// Single non-streaming generation call.
    async fn generate(&self, prompt: &str, timeout: Duration)
    -> Result<GenerateReply, BackendError>;

    /// Model identifiers currently installed on the backend.
    async fn list_models(&self, timeout: Duration) -> Result<Vec<String>, BackendError>;
}
