#![allow(missing_docs)]

mod support;

use chat_arbiter::{BackendError, PROBE_PROMPT, wait_until_ready};
use support::{ScriptedBackend, fast_probe_policy, loading_reply, ready_reply, reply};

#[tokio::test]
async fn ready_on_first_attempt() {
    let backend = ScriptedBackend::new(vec![ready_reply()]);
    assert!(wait_until_ready(&backend, &fast_probe_policy(3)).await);
    assert_eq!(backend.generate_calls(), 1);
    assert_eq!(backend.prompts(), vec![PROBE_PROMPT.to_string()]);
}

#[tokio::test]
async fn loading_every_attempt_exhausts_budget() {
    let backend = ScriptedBackend::new(vec![loading_reply(), loading_reply(), loading_reply()]);
    assert!(!wait_until_ready(&backend, &fast_probe_policy(3)).await);
    assert_eq!(backend.generate_calls(), 3);
}

#[tokio::test]
async fn ready_after_loading_attempts() {
    let backend = ScriptedBackend::new(vec![
        loading_reply(),
        loading_reply(),
        Ok(reply(Some("hi"), None)),
    ]);
    assert!(wait_until_ready(&backend, &fast_probe_policy(3)).await);
    assert_eq!(backend.generate_calls(), 3);
}

#[tokio::test]
async fn failures_are_retried_then_absorbed() {
    let backend = ScriptedBackend::new(vec![
        Err(BackendError::Connection("refused".to_string())),
        Err(BackendError::Http {
            status: 503,
            body: String::new(),
        }),
        Ok(reply(None, Some("stop"))),
    ]);
    assert!(wait_until_ready(&backend, &fast_probe_policy(3)).await);
    assert_eq!(backend.generate_calls(), 3);

    let failing = ScriptedBackend::new(vec![
        Err(BackendError::Timeout),
        Err(BackendError::Timeout),
    ]);
    assert!(!wait_until_ready(&failing, &fast_probe_policy(2)).await);
    assert_eq!(failing.generate_calls(), 2);
}

#[tokio::test]
async fn single_attempt_budget_is_honored() {
    let backend = ScriptedBackend::new(vec![loading_reply(), ready_reply()]);
    assert!(!wait_until_ready(&backend, &fast_probe_policy(1)).await);
    assert_eq!(backend.generate_calls(), 1);
}
