//! Top-level entry: one arbiter per backend, selected by the caller.
//!
//! Primary and fallback are independent; a failing primary is never retried
//! against the fallback.

use std::sync::Arc;

use crate::backend::{BackendSelector, InferenceBackend};
use crate::generator::{ConversationTurn, ResponseGenerator};
use crate::status::{BackendStatus, report_status};

/// Reply generation bound to a single backend.
#[derive(Clone)]
pub struct GenerationArbiter {
    backend: Arc<dyn InferenceBackend>,
    generator: ResponseGenerator,
}

impl GenerationArbiter {
    pub fn new(backend: Arc<dyn InferenceBackend>, generator: ResponseGenerator) -> Self {
        Self { backend, generator }
    }

    pub fn backend(&self) -> &dyn InferenceBackend {
        self.backend.as_ref()
    }

    /// Final reply text for `message`; never fails.
    pub async fn respond(&self, message: &str, history: &[ConversationTurn]) -> String {
        self.generator
            .generate(message, history, self.backend.as_ref())
            .await
    }

    pub async fn status(&self) -> BackendStatus {
        report_status(self.backend.as_ref()).await
    }
}

/// The primary/fallback pair exposed to the routing layer.
#[derive(Clone)]
pub struct ArbiterSet {
    primary: GenerationArbiter,
    fallback: GenerationArbiter,
}

impl ArbiterSet {
    pub fn new(primary: GenerationArbiter, fallback: GenerationArbiter) -> Self {
        Self { primary, fallback }
    }

    pub fn select(&self, selector: BackendSelector) -> &GenerationArbiter {
        match selector {
            BackendSelector::Primary => &self.primary,
            BackendSelector::Fallback => &self.fallback,
        }
    }

    pub async fn respond(
        &self,
        message: &str,
        history: &[ConversationTurn],
        selector: BackendSelector,
    ) -> String {
        tracing::debug!(
            event = "chat.arbiter.respond",
            backend = selector.as_str(),
            history_turns = history.len(),
            "dispatching message"
        );
        self.select(selector).respond(message, history).await
    }

    pub async fn status(&self, selector: BackendSelector) -> BackendStatus {
        self.select(selector).status().await
    }
}
