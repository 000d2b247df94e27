use std::sync::Arc;

use chat_arbiter::{
    ArbiterSet, BackendConfig, DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL, GenerationArbiter,
    GeneratorPolicy, OllamaBackend, ResponseGenerator, RuntimeSettings,
};

use crate::cli::BackendArgs;
use crate::resolve::{resolve_optional_string, resolve_string};

pub(crate) fn resolve_backend_configs(
    args: BackendArgs,
    settings: &RuntimeSettings,
) -> (BackendConfig, BackendConfig) {
    let primary_settings = &settings.backends.primary;
    let fallback_settings = &settings.backends.fallback;
    let primary = BackendConfig::new(
        resolve_string(
            args.endpoint,
            "OLLAMA_BASE_URL",
            primary_settings.endpoint.as_deref(),
            DEFAULT_OLLAMA_ENDPOINT,
        ),
        resolve_string(
            args.model,
            "OLLAMA_MODEL",
            primary_settings.model.as_deref(),
            DEFAULT_OLLAMA_MODEL,
        ),
    );
    let fallback = BackendConfig::new(
        resolve_optional_string(
            args.fallback_endpoint,
            "OLLAMA_FALLBACK_BASE_URL",
            fallback_settings.endpoint.as_deref(),
        )
        .unwrap_or_else(|| primary.endpoint.clone()),
        resolve_optional_string(
            args.fallback_model,
            "OLLAMA_FALLBACK_MODEL",
            fallback_settings.model.as_deref(),
        )
        .unwrap_or_else(|| primary.model.clone()),
    );
    (primary, fallback)
}

pub(crate) fn build_arbiters(args: BackendArgs, settings: &RuntimeSettings) -> ArbiterSet {
    let (primary, fallback) = resolve_backend_configs(args, settings);
    tracing::info!(
        event = "chat.startup.backends",
        primary_endpoint = %primary.endpoint,
        primary_model = %primary.model,
        fallback_endpoint = %fallback.endpoint,
        fallback_model = %fallback.model,
        "backends resolved"
    );
    let generator = ResponseGenerator::new(GeneratorPolicy {
        probe: settings.probe.policy(),
        ..GeneratorPolicy::default()
    });
    let client = reqwest::Client::new();
    ArbiterSet::new(
        GenerationArbiter::new(
            Arc::new(OllamaBackend::with_client(client.clone(), primary)),
            generator,
        ),
        GenerationArbiter::new(
            Arc::new(OllamaBackend::with_client(client, fallback)),
            generator,
        ),
    )
}
