#![forbid(unsafe_code)]

//! Invertible text operations.
//!
//! An [`Operation`] describes one mutation of a [`TextBuffer`]. It can apply
//! itself and produce its inverse as a brand-new `Operation`, so the history
//! engine needs a single mechanism for both directions: take an operation,
//! build its inverse, apply that.
//!
//! # Invariants
//!
//! - `apply()` rewrites the captured fields (`removed`, `old_text` and the
//!   effective `len`) from what actually happened in the buffer, including
//!   length clamping. `invert()` is therefore only meaningful right after the
//!   operation's most recent `apply()`.
//! - `op.invert().invert()` has the same effect as `op` once `op` has been
//!   applied: every inverse already carries the text it will remove or
//!   overwrite.
//! - The inverse of a successful apply is always in bounds. Edits that leave
//!   nothing behind at `pos` (an empty insert, a replace with empty text)
//!   invert to an `Insert`, since delete/replace reject `pos == len`.
//!
//! ```text
//! Insert  { pos, text }                    ──invert──►  Delete  { pos, len: |text|, removed: text }
//! Insert  { pos, "" }                      ──invert──►  Insert  { pos, "" }
//! Delete  { pos, len, removed }            ──invert──►  Insert  { pos, text: removed }
//! Replace { pos, len, new_text, old_text } ──invert──►  Replace { pos, len: |new_text|,
//!                                                                 new_text: old_text,
//!                                                                 old_text: new_text }
//! Replace { pos, len, "", old_text }       ──invert──►  Insert  { pos, text: old_text }
//! ```

use std::fmt;

use crate::buffer::TextBuffer;
use crate::error::{EditError, EditResult, OperationKind};

/// A single invertible text mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert `text` before the char at `pos`.
    Insert { pos: usize, text: String },
    /// Remove up to `len` chars at `pos`; `removed` holds what the last
    /// `apply` took out.
    Delete {
        pos: usize,
        len: usize,
        removed: String,
    },
    /// Overwrite up to `len` chars at `pos` with `new_text`; `old_text` holds
    /// what the last `apply` overwrote.
    Replace {
        pos: usize,
        len: usize,
        new_text: String,
        old_text: String,
    },
}

impl Operation {
    #[must_use]
    pub fn insert(pos: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            pos,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn delete(pos: usize, len: usize) -> Self {
        Self::Delete {
            pos,
            len,
            removed: String::new(),
        }
    }

    #[must_use]
    pub fn replace(pos: usize, len: usize, new_text: impl Into<String>) -> Self {
        Self::Replace {
            pos,
            len,
            new_text: new_text.into(),
            old_text: String::new(),
        }
    }

    /// Apply the operation to `buffer`, refreshing the captured fields.
    ///
    /// On [`EditError::InvalidPosition`] the buffer is untouched and the
    /// captured fields record an empty effect (`removed`/`old_text` empty,
    /// `len` zero).
    pub fn apply(&mut self, buffer: &mut TextBuffer) -> EditResult<()> {
        match self {
            Self::Insert { pos, text } => buffer.insert(*pos, text),
            Self::Delete { pos, len, removed } => {
                let outcome = buffer.delete(*pos, *len);
                *removed = outcome.as_ref().cloned().unwrap_or_default();
                *len = removed.chars().count();
                outcome.map(drop)
            }
            Self::Replace {
                pos,
                len,
                new_text,
                old_text,
            } => {
                let outcome = buffer.replace(*pos, *len, new_text);
                *old_text = outcome.as_ref().cloned().unwrap_or_default();
                *len = old_text.chars().count();
                outcome.map(drop)
            }
        }
    }

    /// Build the operation that undoes this one's most recent application.
    #[must_use]
    pub fn invert(&self) -> Operation {
        match self {
            Self::Insert { pos, text } if text.is_empty() => Self::insert(*pos, ""),
            Self::Insert { pos, text } => Self::Delete {
                pos: *pos,
                len: text.chars().count(),
                removed: text.clone(),
            },
            Self::Delete { pos, removed, .. } => Self::Insert {
                pos: *pos,
                text: removed.clone(),
            },
            Self::Replace {
                pos,
                new_text,
                old_text,
                ..
            } if new_text.is_empty() => Self::Insert {
                pos: *pos,
                text: old_text.clone(),
            },
            Self::Replace {
                pos,
                new_text,
                old_text,
                ..
            } => Self::Replace {
                pos: *pos,
                len: new_text.chars().count(),
                new_text: old_text.clone(),
                old_text: new_text.clone(),
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Insert { .. } => OperationKind::Insert,
            Self::Delete { .. } => OperationKind::Delete,
            Self::Replace { .. } => OperationKind::Replace,
        }
    }

    /// Char position the operation targets.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::Insert { pos, .. } | Self::Delete { pos, .. } | Self::Replace { pos, .. } => *pos,
        }
    }

    /// Human-readable description for history listings.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "Insert text",
            Self::Delete { .. } => "Delete text",
            Self::Replace { .. } => "Replace text",
        }
    }

    /// Size in bytes for memory accounting.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        let payload = match self {
            Self::Insert { text, .. } => text.len(),
            Self::Delete { removed, .. } => removed.len(),
            Self::Replace {
                new_text, old_text, ..
            } => new_text.len() + old_text.len(),
        };
        std::mem::size_of::<Self>() + payload
    }

    /// Check this operation's position against `buffer` without mutating it.
    ///
    /// Mirrors the primitive bounds: inserting accepts `pos == len`, deleting
    /// and replacing do not.
    pub fn check(&self, buffer: &TextBuffer) -> EditResult<()> {
        let len = buffer.len_chars();
        let pos = self.position();
        let valid = match self {
            Self::Insert { .. } => pos <= len,
            Self::Delete { .. } | Self::Replace { .. } => pos < len,
        };
        if valid {
            Ok(())
        } else {
            Err(EditError::InvalidPosition {
                kind: self.kind(),
                pos,
                len,
            })
        }
    }

    /// True when `err` came from this operation's own primitive.
    #[must_use]
    pub fn rejected_by(&self, err: &EditError) -> bool {
        matches!(err, EditError::InvalidPosition { kind, .. } if *kind == self.kind())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { pos, text } => write!(f, "insert {pos} {text:?}"),
            Self::Delete { pos, len, removed } => {
                write!(f, "delete {pos} {len}")?;
                if !removed.is_empty() {
                    write!(f, " (removed {removed:?})")?;
                }
                Ok(())
            }
            Self::Replace {
                pos,
                len,
                new_text,
                old_text,
            } => {
                write!(f, "replace {pos} {len} {new_text:?}")?;
                if !old_text.is_empty() {
                    write!(f, " (was {old_text:?})")?;
                }
                Ok(())
            }
        }
    }
}
