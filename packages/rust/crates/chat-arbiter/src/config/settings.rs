//! Runtime settings loader for chat-arbiter.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/chat-arbiter/settings.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::backend::BackendConfig;
use crate::prober::ProbePolicy;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "chat-arbiter/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub backends: BackendsSettings,
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub probe: ProbeSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendsSettings {
    #[serde(default)]
    pub primary: BackendSettings,
    #[serde(default)]
    pub fallback: BackendSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendSettings {
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewaySettings {
    pub bind: Option<String>,
    pub max_concurrent: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeSettings {
    pub max_attempts: Option<u32>,
    pub loading_backoff_ms: Option<u64>,
    pub failure_backoff_ms: Option<u64>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            backends: BackendsSettings {
                primary: self.backends.primary.merge(overlay.backends.primary),
                fallback: self.backends.fallback.merge(overlay.backends.fallback),
            },
            gateway: self.gateway.merge(overlay.gateway),
            probe: self.probe.merge(overlay.probe),
        }
    }
}

impl BackendSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            endpoint: overlay.endpoint.or(self.endpoint),
            model: overlay.model.or(self.model),
        }
    }

    /// Fill unset fields from `defaults`.
    #[must_use]
    pub fn to_config(&self, defaults: &BackendConfig) -> BackendConfig {
        BackendConfig::new(
            self.endpoint
                .clone()
                .unwrap_or_else(|| defaults.endpoint.clone()),
            self.model.clone().unwrap_or_else(|| defaults.model.clone()),
        )
    }
}

impl GatewaySettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            bind: overlay.bind.or(self.bind),
            max_concurrent: overlay.max_concurrent.or(self.max_concurrent),
        }
    }
}

impl ProbeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            max_attempts: overlay.max_attempts.or(self.max_attempts),
            loading_backoff_ms: overlay.loading_backoff_ms.or(self.loading_backoff_ms),
            failure_backoff_ms: overlay.failure_backoff_ms.or(self.failure_backoff_ms),
        }
    }

    /// Default probe policy with any configured overrides applied.
    /// A zero attempt budget is ignored.
    #[must_use]
    pub fn policy(&self) -> ProbePolicy {
        let defaults = ProbePolicy::default();
        ProbePolicy {
            max_attempts: self
                .max_attempts
                .filter(|attempts| *attempts > 0)
                .unwrap_or(defaults.max_attempts),
            attempt_timeout: defaults.attempt_timeout,
            loading_backoff: self
                .loading_backoff_ms
                .map_or(defaults.loading_backoff, Duration::from_millis),
            failure_backoff: self
                .failure_backoff_ms
                .map_or(defaults.failure_backoff, Duration::from_millis),
        }
    }
}

/// Load merged runtime settings (user overrides system).
pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RuntimeSettings {
    if !path.exists() {
        return RuntimeSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RuntimeSettings::default();
        }
    };
    match serde_yaml::from_str::<RuntimeSettings>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RuntimeSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
