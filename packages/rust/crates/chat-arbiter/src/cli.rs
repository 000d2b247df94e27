use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use chat_arbiter::BackendSelector;

#[derive(Parser)]
#[command(name = "chat-arbiter")]
#[command(about = "Chat replies from local Ollama backends with an arithmetic fast path.")]
pub(crate) struct Cli {
    /// Override config directory (settings are read from `<conf>/chat-arbiter/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum BackendChoice {
    #[default]
    Primary,
    Fallback,
}

impl From<BackendChoice> for BackendSelector {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Primary => Self::Primary,
            BackendChoice::Fallback => Self::Fallback,
        }
    }
}

/// Backend overrides shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct BackendArgs {
    /// Primary Ollama base URL (env: OLLAMA_BASE_URL)
    #[arg(long)]
    pub(crate) endpoint: Option<String>,

    /// Primary model identifier (env: OLLAMA_MODEL)
    #[arg(long)]
    pub(crate) model: Option<String>,

    /// Fallback Ollama base URL (env: OLLAMA_FALLBACK_BASE_URL; default: primary)
    #[arg(long)]
    pub(crate) fallback_endpoint: Option<String>,

    /// Fallback model identifier (env: OLLAMA_FALLBACK_MODEL; default: primary)
    #[arg(long)]
    pub(crate) fallback_model: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run HTTP server (POST /chat, GET /ai/status). Default bind: 0.0.0.0:8000
    Gateway {
        /// Listen address (env: CHAT_ARBITER_BIND)
        #[arg(long)]
        bind: Option<String>,

        /// Max concurrent chat turns (omit for no limit)
        #[arg(long)]
        max_concurrent: Option<usize>,

        #[command(flatten)]
        backends: BackendArgs,
    },
    /// Answer one message and print the reply.
    Ask {
        /// User message.
        message: String,

        /// JSON file with prior turns: `[{"role": "user", "content": "..."}, ...]`
        #[arg(long)]
        history: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = BackendChoice::Primary)]
        backend: BackendChoice,

        #[command(flatten)]
        backends: BackendArgs,
    },
    /// Print connectivity and installed models of a backend as JSON.
    Status {
        #[arg(long, value_enum, default_value_t = BackendChoice::Primary)]
        backend: BackendChoice,

        #[command(flatten)]
        backends: BackendArgs,
    },
}
