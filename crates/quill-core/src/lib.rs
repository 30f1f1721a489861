#![forbid(unsafe_code)]

//! Quill Core
//!
//! An in-memory text document that is mutated exclusively through invertible
//! [`Operation`]s, with strict LIFO undo/redo.
//!
//! # Key Components
//!
//! - [`TextBuffer`] - Bounds-checked char-indexed text storage
//! - [`Operation`] - Insert / Delete / Replace, each able to apply and invert itself
//! - [`HistoryEngine`] - Owns the buffer plus the undo and redo stacks
//! - [`EditError`] - Recoverable conditions reported by the above
//!
//! # Quick Start
//!
//! ```
//! use quill_core::{HistoryEngine, Operation};
//!
//! let mut engine = HistoryEngine::default();
//! engine.execute(Operation::insert(0, "hello")).unwrap();
//! engine.execute(Operation::delete(1, 3)).unwrap();
//! assert_eq!(engine.current_text(), "ho");
//!
//! engine.undo().unwrap();
//! engine.undo().unwrap();
//! assert_eq!(engine.current_text(), "");
//!
//! engine.redo().unwrap();
//! assert_eq!(engine.current_text(), "hello");
//! ```
//!
//! # Concurrency
//!
//! Everything is synchronous and every mutating entry point takes `&mut self`.
//! An embedding that shares an engine across threads must put the whole
//! engine behind one lock: `execute`, `undo` and `redo` are not safe to
//! interleave.

pub mod buffer;
pub mod error;
pub mod history;
pub mod operation;

pub use buffer::TextBuffer;
pub use error::{EditError, EditResult, OperationKind};
pub use history::{HistoryConfig, HistoryEngine, InvalidOpPolicy};
pub use operation::Operation;
