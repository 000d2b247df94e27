//! chat-arbiter CLI: HTTP gateway, one-shot ask, or backend status.
//!
//! Logging: set `RUST_LOG=chat_arbiter=debug` (or `info`, `warn`) to see logs on stderr.

mod arbiter_builder;
mod cli;
mod resolve;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chat_arbiter::{
    BackendSelector, ConversationTurn, load_runtime_settings, run_http, set_config_home_override,
};

use crate::arbiter_builder::build_arbiters;
use crate::cli::{Cli, Command};
use crate::resolve::{resolve_optional_positive_usize, resolve_string};

const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides; else info for this crate.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chat_arbiter=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let runtime_settings = load_runtime_settings();

    match cli.command {
        Command::Gateway {
            bind,
            max_concurrent,
            backends,
        } => {
            let bind = resolve_string(
                bind,
                "CHAT_ARBITER_BIND",
                runtime_settings.gateway.bind.as_deref(),
                DEFAULT_BIND,
            );
            let max_concurrent = resolve_optional_positive_usize(
                max_concurrent,
                "CHAT_ARBITER_MAX_CONCURRENT",
                runtime_settings.gateway.max_concurrent,
            );
            let arbiters = build_arbiters(backends, &runtime_settings);
            run_http(arbiters, &bind, max_concurrent).await
        }
        Command::Ask {
            message,
            history,
            backend,
            backends,
        } => {
            let history = match history {
                Some(path) => read_history(&path)?,
                None => Vec::new(),
            };
            let arbiters = build_arbiters(backends, &runtime_settings);
            let reply = arbiters
                .respond(&message, &history, BackendSelector::from(backend))
                .await;
            println!("{reply}");
            Ok(())
        }
        Command::Status { backend, backends } => {
            let arbiters = build_arbiters(backends, &runtime_settings);
            let status = arbiters.status(BackendSelector::from(backend)).await;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
    }
}

fn read_history(path: &Path) -> anyhow::Result<Vec<ConversationTurn>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("history file {} is not a JSON list of turns", path.display()))
}
