#![forbid(unsafe_code)]

//! Quill
//!
//! Line-oriented front end for [`quill_core`]. It reads commands from stdin,
//! maps them onto the engine's `execute` / `undo` / `redo` / `current_text`
//! entry points, and prints one line of feedback per informational condition.
//!
//! # Key Components
//!
//! - [`cli::Cli`] - Command-line flags
//! - [`config::QuillConfig`] - TOML configuration
//! - [`command::parse`] - Input line parser
//! - [`session::Session`] - The editing loop

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;

pub use cli::run_from_env;
pub use error::{QuillError, Result};
