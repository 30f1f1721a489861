#![forbid(unsafe_code)]

//! Parsing of session input lines into editor commands.
//!
//! ```text
//! insert  <pos> <text>          1 <pos> <text>
//! delete  <pos> <len>           2 <pos> <len>
//! replace <pos> <len> <text>    3 <pos> <len> <text>
//! undo                          4
//! redo                          5
//! show                          6
//! exit | quit                   7
//! history
//! help
//! ```
//!
//! `<text>` is the rest of the line after the single separator that follows
//! the numeric arguments, so spaces inside it or at either end are kept.
//! Only the line terminator is stripped. Positions and lengths are
//! non-negative char counts.

use quill_core::Operation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(Operation),
    Undo,
    Redo,
    Show,
    History,
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid! unknown command `{0}` (type `help` for a list)")]
    UnknownCommand(String),
    #[error("{command}: missing <{arg}>")]
    MissingArgument {
        command: &'static str,
        arg: &'static str,
    },
    #[error("{command}: <{arg}> must be a non-negative integer, got `{value}`")]
    InvalidNumber {
        command: &'static str,
        arg: &'static str,
        value: String,
    },
    #[error("{command}: unexpected argument `{extra}`")]
    UnexpectedArgument {
        command: &'static str,
        extra: String,
    },
}

pub const HELP: &str = "\
commands:
  insert <pos> <text>         (1)  insert text before char <pos>
  delete <pos> <len>          (2)  delete up to <len> chars at <pos>
  replace <pos> <len> <text>  (3)  overwrite up to <len> chars at <pos>
  undo                        (4)  revert the last edit
  redo                        (5)  re-apply the last undone edit
  show                        (6)  print the document
  history                          list undo/redo entries
  help                             print this list
  exit | quit                 (7)  leave";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let (head, rest) = split_word(line.trim_end_matches(['\n', '\r']));
    if head.is_empty() {
        return Ok(None);
    }

    let command = match head.to_ascii_lowercase().as_str() {
        "insert" | "1" => {
            let (pos, rest) = number("insert", "pos", rest)?;
            let text = remainder("insert", "text", rest)?;
            Command::Edit(Operation::insert(pos, text))
        }
        "delete" | "2" => {
            let (pos, rest) = number("delete", "pos", rest)?;
            let (len, rest) = number("delete", "len", rest)?;
            no_more("delete", rest)?;
            Command::Edit(Operation::delete(pos, len))
        }
        "replace" | "3" => {
            let (pos, rest) = number("replace", "pos", rest)?;
            let (len, rest) = number("replace", "len", rest)?;
            let text = remainder("replace", "text", rest)?;
            Command::Edit(Operation::replace(pos, len, text))
        }
        "undo" | "4" => bare("undo", rest, Command::Undo)?,
        "redo" | "5" => bare("redo", rest, Command::Redo)?,
        "show" | "6" => bare("show", rest, Command::Show)?,
        "exit" | "quit" | "7" => bare("exit", rest, Command::Exit)?,
        "history" => bare("history", rest, Command::History)?,
        "help" | "?" => bare("help", rest, Command::Help)?,
        _ => return Err(ParseError::UnknownCommand(head.to_string())),
    };
    Ok(Some(command))
}

/// Split off the first whitespace-delimited word. The rest keeps the
/// whitespace that follows the word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => s.split_at(idx),
        None => (s, ""),
    }
}

fn number<'a>(
    command: &'static str,
    arg: &'static str,
    s: &'a str,
) -> Result<(usize, &'a str), ParseError> {
    let (word, rest) = split_word(s);
    if word.is_empty() {
        return Err(ParseError::MissingArgument { command, arg });
    }
    let value = word.parse().map_err(|_| ParseError::InvalidNumber {
        command,
        arg,
        value: word.to_string(),
    })?;
    Ok((value, rest))
}

/// Everything after exactly one separator character.
fn remainder(command: &'static str, arg: &'static str, s: &str) -> Result<String, ParseError> {
    let mut chars = s.chars();
    match chars.next() {
        Some(sep) if sep.is_whitespace() && !chars.as_str().is_empty() => {
            Ok(chars.as_str().to_string())
        }
        _ => Err(ParseError::MissingArgument { command, arg }),
    }
}

fn no_more(command: &'static str, rest: &str) -> Result<(), ParseError> {
    let extra = rest.trim();
    if extra.is_empty() {
        Ok(())
    } else {
        Err(ParseError::UnexpectedArgument {
            command,
            extra: extra.to_string(),
        })
    }
}

fn bare(command: &'static str, rest: &str, parsed: Command) -> Result<Command, ParseError> {
    no_more(command, rest)?;
    Ok(parsed)
}
