//! Configuration for graphstep.
//!
//! Values are layered with `figment`: built-in defaults, then
//! `graphstep.toml`, then `GRAPHSTEP_*` environment variables (nested keys
//! separated by `__`, e.g. `GRAPHSTEP_ANIMATION__STEP_INTERVAL_MS=500`).

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::DEFAULT_MAX_NODES;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "graphstep.toml";

/// Prefix of the environment variables that override file values.
pub const ENV_PREFIX: &str = "GRAPHSTEP_";

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong type.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A value parsed but is out of range.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Dotted key of the offending value.
        key: String,
        /// What is wrong with it.
        message: String,
    },
}

/// How the animation stepper advances a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// `POST /api/step`: the executor advances exactly one unit per call.
    #[default]
    Step,
    /// `GET /algoritmo/estado`: the executor plays on its own, we poll.
    Poll,
}

/// Graph store limits and editing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum number of live nodes.
    pub max_nodes: usize,
    /// Direction of edges created by the click-to-connect gesture.
    pub default_directed: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            default_directed: true,
        }
    }
}

/// Remote executor endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Base URL, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: 5_000,
        }
    }
}

impl ExecutorConfig {
    /// Returns the request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Animation pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay between automatic steps, in milliseconds.
    pub step_interval_ms: u64,
    /// Step or poll protocol.
    pub playback: PlaybackMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 1_000,
            playback: PlaybackMode::Step,
        }
    }
}

impl AnimationConfig {
    /// Returns the step interval.
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

/// Save/load defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File name used by `save` when no path is given.
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file_name: crate::serialization::DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Logging defaults (used when `RUST_LOG` is unset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `graphstep_core=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphstepConfig {
    /// Graph store settings.
    pub graph: GraphConfig,
    /// Remote executor settings.
    pub executor: ExecutorConfig,
    /// Animation settings.
    pub animation: AnimationConfig,
    /// Save/load settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl GraphstepConfig {
    /// Loads defaults, `graphstep.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE_NAME)
    }

    /// Loads defaults, the given TOML file (if present) and the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::extract(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Toml::file(path.as_ref()))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Parses a TOML document on top of the defaults (no environment).
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::extract(Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(toml)))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.max_nodes == 0 {
            return Err(invalid("graph.max_nodes", "must be at least 1"));
        }
        if self.animation.step_interval_ms == 0 {
            return Err(invalid("animation.step_interval_ms", "must be positive"));
        }
        if self.executor.request_timeout_ms == 0 {
            return Err(invalid("executor.request_timeout_ms", "must be positive"));
        }
        let url = self.executor.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "executor.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.storage.file_name.trim().is_empty() {
            return Err(invalid("storage.file_name", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
