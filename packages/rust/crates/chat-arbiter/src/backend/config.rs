//! Backend identity: endpoint + model, and the selector used by callers.

use serde::{Deserialize, Serialize};

/// Default Ollama endpoint when nothing is configured.
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
/// Default model identifier when nothing is configured.
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen3:8b";

/// One inference backend. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `http://localhost:11434` (trailing `/` is trimmed).
    pub endpoint: String,
    /// Model identifier passed on every generate call.
    pub model: String,
}

impl BackendConfig {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// `{endpoint}/api/generate`.
    #[must_use]
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }

    /// `{endpoint}/api/tags`.
    #[must_use]
    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.endpoint)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL)
    }
}

/// Which of the two independently configured backends a request targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendSelector {
    #[default]
    Primary,
    Fallback,
}

impl BackendSelector {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}
