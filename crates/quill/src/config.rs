#![forbid(unsafe_code)]

//! TOML configuration for the `quill` front end.
//!
//! ```toml
//! # quill.toml
//! [history]
//! max_depth = 500
//! max_bytes = 1048576
//! invalid_ops = "reject"   # or "track"
//!
//! [log]
//! filter = "quill_core=debug"
//! ```
//!
//! Every field is optional; `QuillConfig::default()` matches the engine's
//! built-in defaults. Command-line flags override file values.

use std::path::{Path, PathBuf};

use quill_core::HistoryConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuillConfig {
    pub history: HistoryConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl QuillConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Fail with [`ConfigError::Validation`] if any limit is unusable.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.history.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
