#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never interleave with the session transcript on
//! stdout. The filter directive is chosen from, in order: `--log-filter`, the
//! config file's `log.filter`, the `QUILL_LOG` environment variable, and
//! finally [`DEFAULT_FILTER`].

use tracing_subscriber::EnvFilter;

use crate::error::{QuillError, Result};

pub const LOG_ENV_VAR: &str = "QUILL_LOG";
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive by precedence.
#[must_use]
pub fn resolve_filter(cli: Option<&str>, config: Option<&str>, env: Option<String>) -> String {
    cli.or(config)
        .map(str::to_owned)
        .or(env)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

/// Build an [`EnvFilter`], rejecting malformed directives.
pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| QuillError::Logging(format!("invalid filter `{directive}`: {e}")))
}

/// Install the global stderr subscriber.
pub fn init(directive: &str) -> Result<()> {
    let filter = build_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| QuillError::Logging(e.to_string()))
}
