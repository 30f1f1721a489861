use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use quill_core::{HistoryEngine, InvalidOpPolicy};

use crate::config::QuillConfig;
use crate::error::Result;
use crate::logging;
use crate::session::Session;

#[derive(Debug, Default, Parser)]
#[command(
    name = "quill",
    about = "In-memory text editor with linear undo/redo",
    version
)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum number of undoable edits to keep.
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Do not record edits whose position is out of bounds.
    #[arg(long)]
    pub reject_invalid: bool,

    /// tracing filter directive, e.g. `quill_core=debug`.
    #[arg(long, value_name = "DIRECTIVE")]
    pub log_filter: Option<String>,

    /// Text the document starts with (not undoable).
    #[arg(long, value_name = "TEXT")]
    pub initial: Option<String>,

    /// Never print the `> ` prompt, even on a terminal.
    #[arg(long)]
    pub no_prompt: bool,
}

impl Cli {
    /// Load the config file (if any) and apply flag overrides.
    pub fn effective_config(&self) -> Result<QuillConfig> {
        let mut config = match &self.config {
            Some(path) => QuillConfig::from_toml_file(path)?,
            None => QuillConfig::default(),
        };
        if let Some(max_depth) = self.max_depth {
            config.history.max_depth = max_depth;
        }
        if self.reject_invalid {
            config.history.invalid_ops = InvalidOpPolicy::Reject;
        }
        Ok(config.validated()?)
    }

    /// Build the session this invocation describes.
    pub fn session(&self, config: &QuillConfig) -> Session {
        let engine = HistoryEngine::with_text(
            self.initial.as_deref().unwrap_or_default(),
            config.history.clone(),
        );
        Session::new(engine)
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.effective_config()?;
    let filter = logging::resolve_filter(
        cli.log_filter.as_deref(),
        config.log.filter.as_deref(),
        std::env::var(logging::LOG_ENV_VAR).ok(),
    );
    logging::init(&filter)?;
    tracing::debug!(config = ?config, "starting session");

    let stdin = io::stdin();
    let interactive = !cli.no_prompt && stdin.is_terminal();
    let mut session = cli.session(&config);
    if interactive {
        session = session.with_prompt("> ");
    }
    let mut stdout = io::stdout().lock();
    session.run(stdin.lock(), &mut stdout)?;
    Ok(())
}
