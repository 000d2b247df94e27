//! Readiness probe for lazily loaded models.
//!
//! Ollama loads weights on first use and answers with `done_reason: "load"`
//! instead of blocking, so readiness is polled with a canned prompt.

use std::time::{Duration, Instant};

use crate::backend::InferenceBackend;

/// Canned prompt sent on every probe attempt.
pub const PROBE_PROMPT: &str = "你好";

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOADING_BACKOFF_SECS: u64 = 5;
const DEFAULT_FAILURE_BACKOFF_SECS: u64 = 2;

/// Attempt budget, per-attempt timeout and backoffs. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePolicy {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    /// Sleep after a "still loading" answer.
    pub loading_backoff: Duration,
    /// Sleep after a non-2xx status or transport failure.
    pub failure_backoff: Duration,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempt_timeout: Duration::from_secs(DEFAULT_ATTEMPT_TIMEOUT_SECS),
            loading_backoff: Duration::from_secs(DEFAULT_LOADING_BACKOFF_SECS),
            failure_backoff: Duration::from_secs(DEFAULT_FAILURE_BACKOFF_SECS),
        }
    }
}

impl ProbePolicy {
    /// Same timeouts and backoffs with a different attempt budget.
    #[must_use]
    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }
}

/// Poll `backend` until it answers without the loading sentinel.
///
/// Returns `false` once `policy.max_attempts` attempts are exhausted. Every
/// backend failure is absorbed; this never errors.
pub async fn wait_until_ready<B>(backend: &B, policy: &ProbePolicy) -> bool
where
    B: InferenceBackend + ?Sized,
{
    let config = backend.config();
    let started = Instant::now();
    for attempt in 1..=policy.max_attempts {
        match backend.generate(PROBE_PROMPT, policy.attempt_timeout).await {
            Ok(reply) if !reply.is_loading() => {
                tracing::debug!(
                    event = "chat.probe.ready",
                    endpoint = %config.endpoint,
                    model = %config.model,
                    attempt,
                    max_attempts = policy.max_attempts,
                    elapsed_ms = started.elapsed().as_millis(),
                    "backend model ready"
                );
                return true;
            }
            Ok(_) => {
                tracing::info!(
                    event = "chat.probe.loading",
                    endpoint = %config.endpoint,
                    model = %config.model,
                    attempt,
                    max_attempts = policy.max_attempts,
                    "backend model still loading; waiting"
                );
                tokio::time::sleep(policy.loading_backoff).await;
            }
            Err(error) => {
                tracing::warn!(
                    event = "chat.probe.failed",
                    endpoint = %config.endpoint,
                    model = %config.model,
                    attempt,
                    max_attempts = policy.max_attempts,
                    error_kind = error.kind(),
                    error = %error,
                    "backend readiness probe failed"
                );
                tokio::time::sleep(policy.failure_backoff).await;
            }
        }
    }
    tracing::warn!(
        event = "chat.probe.exhausted",
        endpoint = %config.endpoint,
        model = %config.model,
        max_attempts = policy.max_attempts,
        elapsed_ms = started.elapsed().as_millis(),
        "backend model not ready after all probe attempts"
    );
    false
}
