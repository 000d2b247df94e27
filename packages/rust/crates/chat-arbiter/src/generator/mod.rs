//! Response generation: arithmetic fast path, readiness gate, prompt
//! assembly, one backend call, post-processing.
//!
//! Every failure becomes one of the fixed texts in [`replies`]; nothing here
//! returns an error to the caller.

mod prompt;
mod reasoning;
pub mod replies;

use std::time::{Duration, Instant};

use crate::backend::{BackendError, GenerateReply, InferenceBackend};
use crate::evaluator::{self, EvaluationResult};
use crate::prober::{ProbePolicy, wait_until_ready};

pub use prompt::{ConversationTurn, HISTORY_WINDOW, Role, build_prompt, recent_turns};
pub use reasoning::strip_reasoning;

const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 60;

/// Timeouts and probe budget used by [`ResponseGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorPolicy {
    pub probe: ProbePolicy,
    pub generate_timeout: Duration,
}

impl Default for GeneratorPolicy {
    fn default() -> Self {
        Self {
            probe: ProbePolicy::default(),
            generate_timeout: Duration::from_secs(DEFAULT_GENERATE_TIMEOUT_SECS),
        }
    }
}

/// Stateless reply generator; safe to share across concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseGenerator {
    policy: GeneratorPolicy,
}

impl ResponseGenerator {
    pub fn new(policy: GeneratorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &GeneratorPolicy {
        &self.policy
    }

    /// Produce the reply text for `message` given prior `history`.
    pub async fn generate<B>(
        &self,
        message: &str,
        history: &[ConversationTurn],
        backend: &B,
    ) -> String
    where
        B: InferenceBackend + ?Sized,
    {
        match evaluator::evaluate(message) {
            EvaluationResult::Success { value } => return replies::computed_answer(value),
            EvaluationResult::Error { reason } => return replies::computation_error(&reason),
            EvaluationResult::NotApplicable => {}
        }

        if !wait_until_ready(backend, &self.policy.probe).await {
            return replies::MODEL_LOADING.to_string();
        }

        let prompt = build_prompt(message, history);
        let config = backend.config();
        let started = Instant::now();
        tracing::debug!(
            event = "chat.generate.request",
            endpoint = %config.endpoint,
            model = %config.model,
            history_turns = recent_turns(history).len(),
            prompt_chars = prompt.chars().count(),
            "sending generation request"
        );
        match backend.generate(&prompt, self.policy.generate_timeout).await {
            Ok(reply) => {
                tracing::debug!(
                    event = "chat.generate.completed",
                    endpoint = %config.endpoint,
                    elapsed_ms = started.elapsed().as_millis(),
                    done_reason = reply.done_reason.as_deref().unwrap_or(""),
                    "generation request completed"
                );
                reply_text(reply)
            }
            Err(error) => {
                tracing::warn!(
                    event = "chat.generate.failed",
                    endpoint = %config.endpoint,
                    model = %config.model,
                    elapsed_ms = started.elapsed().as_millis(),
                    error_kind = error.kind(),
                    error = %error,
                    "generation request failed"
                );
                reply_for_error(&error)
            }
        }
    }
}

/// Post-process a successful generate reply.
#[must_use]
pub fn reply_text(reply: GenerateReply) -> String {
    let is_loading = reply.is_loading();
    let text = reply
        .response
        .as_deref()
        .map(strip_reasoning)
        .unwrap_or_default();
    if !text.is_empty() {
        return text;
    }
    if is_loading {
        return replies::MODEL_LOADING.to_string();
    }
    replies::NO_VALID_REPLY.to_string()
}

/// Fixed reply for a failed generate call.
#[must_use]
pub fn reply_for_error(error: &BackendError) -> String {
    match error {
        BackendError::Http { status, .. } => replies::service_unavailable(*status),
        BackendError::Connection(_) => replies::CANNOT_CONNECT.to_string(),
        BackendError::Timeout => replies::TIMED_OUT.to_string(),
        BackendError::MalformedResponse(_) | BackendError::Other(_) => {
            replies::PROCESSING_ERROR.to_string()
        }
    }
}
