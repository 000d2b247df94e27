//! Chat reply arbitration over local Ollama backends.
//!
//! - **Evaluator**: arithmetic-looking messages are answered deterministically, no model call.
//! - **Generator**: readiness probe → prompt from the last turns → one generate call →
//!   reasoning spans stripped; every failure maps to a fixed reply text.
//! - **Arbiter**: primary and fallback backends as two independent instances.

#![allow(missing_docs)]

mod arbiter;
mod backend;
mod config;
mod evaluator;
mod gateway;
mod generator;
mod prober;
mod status;

pub use arbiter::{ArbiterSet, GenerationArbiter};
pub use backend::{
    BackendConfig, BackendError, BackendSelector, DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL,
    GenerateReply, InferenceBackend, LOADING_DONE_REASON, OllamaBackend,
};
pub use config::{
    BackendSettings, BackendsSettings, GatewaySettings, ProbeSettings, RuntimeSettings,
    load_runtime_settings, load_runtime_settings_from_paths, runtime_settings_paths,
    set_config_home_override,
};
pub use evaluator::{EvalError, EvaluationResult, Number, evaluate, normalize_query};
pub use gateway::{
    ChatRequest, ChatResponse, GatewayHealthResponse, GatewayState, StatusQuery, router, run_http,
    validate_chat_request,
};
pub use generator::{
    ConversationTurn, GeneratorPolicy, HISTORY_WINDOW, ResponseGenerator, Role, build_prompt,
    recent_turns, replies, reply_for_error, reply_text, strip_reasoning,
};
pub use prober::{PROBE_PROMPT, ProbePolicy, wait_until_ready};
pub use status::{BackendStatus, STATUS_TIMEOUT, report_status};
