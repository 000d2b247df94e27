//! Gateway namespace: HTTP entrypoint.

mod http;

pub use http::{
    ChatRequest, ChatResponse, GatewayHealthResponse, GatewayState, StatusQuery, router, run_http,
    validate_chat_request,
};
