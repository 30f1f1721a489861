#![forbid(unsafe_code)]

//! The interactive editing loop.
//!
//! A [`Session`] owns a [`HistoryEngine`] and drives it from parsed input
//! lines, writing one line of feedback per informational condition. The loop
//! is generic over `BufRead`/`Write`, so scripted transcripts exercise the
//! same path as a terminal.

use std::io::{self, BufRead, Write};

use quill_core::{EditResult, HistoryEngine};

use crate::command::{self, Command, HELP};

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Editing session over one engine.
#[derive(Debug)]
pub struct Session {
    engine: HistoryEngine,
    prompt: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(engine: HistoryEngine) -> Self {
        Self {
            engine,
            prompt: None,
        }
    }

    /// Print `prompt` before reading each line.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn engine(&self) -> &HistoryEngine {
        &self.engine
    }

    #[must_use]
    pub fn into_engine(self) -> HistoryEngine {
        self.engine
    }

    /// Read lines until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> io::Result<()> {
        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(output, "{prompt}")?;
                output.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("session: end of input");
                return Ok(());
            }
            if self.handle_line(&line, output)? == Flow::Exit {
                tracing::debug!("session: exit requested");
                return Ok(());
            }
        }
    }

    /// Parse and execute a single line.
    pub fn handle_line<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<Flow> {
        match command::parse(line) {
            Ok(Some(cmd)) => self.dispatch(cmd, output),
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                tracing::debug!(line = line.trim_end(), error = %err, "session: unparsable input");
                writeln!(output, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch<W: Write>(&mut self, cmd: Command, output: &mut W) -> io::Result<Flow> {
        match cmd {
            Command::Edit(op) => report(self.engine.execute(op), output)?,
            Command::Undo => report(self.engine.undo(), output)?,
            Command::Redo => report(self.engine.redo(), output)?,
            Command::Show => writeln!(output, "Document: \"{}\"", self.engine.buffer())?,
            Command::History => self.write_history(output)?,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn write_history<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "undo (most recent first):")?;
        write_entries(self.engine.undo_entries(), output)?;
        writeln!(output, "redo (most recent first):")?;
        write_entries(self.engine.redo_entries(), output)
    }
}

fn write_entries<'a, W: Write>(
    entries: impl Iterator<Item = &'a quill_core::Operation>,
    output: &mut W,
) -> io::Result<()> {
    let mut any = false;
    for (i, op) in entries.enumerate() {
        writeln!(output, "  {}. {op}", i + 1)?;
        any = true;
    }
    if !any {
        writeln!(output, "  (empty)")?;
    }
    Ok(())
}

/// Print informational conditions; successful edits are silent.
fn report<W: Write>(outcome: EditResult<()>, output: &mut W) -> io::Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(err) => writeln!(output, "{err}"),
    }
}
