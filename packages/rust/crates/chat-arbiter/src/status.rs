//! Backend connectivity and installed-model report for health surfaces.

use std::time::Duration;

use serde::Serialize;

use crate::backend::{BackendError, InferenceBackend};

/// Timeout for the list-models call behind a status report.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Snapshot returned by [`report_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub connected: bool,
    /// Empty unless `connected`.
    pub available_models: Vec<String>,
    pub current_model: String,
}

/// Probe `backend` with one list-models call. Never errors.
pub async fn report_status<B>(backend: &B) -> BackendStatus
where
    B: InferenceBackend + ?Sized,
{
    let config = backend.config();
    let (connected, available_models) = match backend.list_models(STATUS_TIMEOUT).await {
        Ok(models) => (true, models),
        // 2xx but not the expected shape: reachable, nothing listed.
        Err(BackendError::MalformedResponse(detail)) => {
            tracing::warn!(
                event = "chat.status.malformed_models",
                endpoint = %config.endpoint,
                detail = %detail,
                "backend model list could not be decoded"
            );
            (true, Vec::new())
        }
        Err(error) => {
            tracing::debug!(
                event = "chat.status.unreachable",
                endpoint = %config.endpoint,
                error_kind = error.kind(),
                error = %error,
                "backend status check failed"
            );
            (false, Vec::new())
        }
    };
    BackendStatus {
        connected,
        available_models,
        current_model: config.model.clone(),
    }
}
