//! Configuration model for execp
//!
//! Defines the structure for XDG-compliant layered configuration.

use serde::{Deserialize, Serialize};

use crate::executor::{DecodePolicy, ExecOptions};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Command execution settings
    #[serde(default)]
    pub exec: ExecConfig,

    /// Log output settings for the CLI
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Build execution options from the configured defaults
    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions::default().with_decode(self.exec.decode)
    }
}

/// Command execution settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ExecConfig {
    /// Handling of output that is not valid UTF-8
    #[serde(default)]
    pub decode: DecodePolicy,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Log output settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}
