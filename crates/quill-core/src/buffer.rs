#![forbid(unsafe_code)]

//! Bounds-checked text storage.
//!
//! [`TextBuffer`] wraps a [`Rope`] and exposes exactly three mutating
//! primitives. Every position and length is measured in chars, so multi-byte
//! text can never be split in the middle of a code point.
//!
//! # Boundary rules
//!
//! | primitive | valid `pos`      | `len` handling                  |
//! |-----------|------------------|---------------------------------|
//! | insert    | `pos <= len()`   | n/a                             |
//! | delete    | `pos <  len()`   | clamped to `len() - pos`        |
//! | replace   | `pos <  len()`   | clamped to `len() - pos`        |
//!
//! Deleting or replacing at `pos == len()` is rejected even though inserting
//! there appends.

use std::fmt;

use ropey::Rope;

use crate::error::{EditError, EditResult, OperationKind};

/// Owned, mutable character sequence.
#[derive(Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("len_chars", &self.rope.len_chars())
            .field("text", &self.text())
            .finish()
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl TextBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Length in chars.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Snapshot of the full contents.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert `text` before the char at `pos`; `pos == len_chars()` appends.
    pub fn insert(&mut self, pos: usize, text: &str) -> EditResult<()> {
        let len = self.len_chars();
        if pos > len {
            return Err(EditError::InvalidPosition {
                kind: OperationKind::Insert,
                pos,
                len,
            });
        }
        self.rope.insert(pos, text);
        Ok(())
    }

    /// Remove up to `len` chars starting at `pos` and return them.
    ///
    /// The returned string's char count is the clamped length; callers that
    /// need to invert the edit must remember it.
    pub fn delete(&mut self, pos: usize, len: usize) -> EditResult<String> {
        let end = self.checked_span(OperationKind::Delete, pos, len)?;
        let removed = self.rope.slice(pos..end).to_string();
        self.rope.remove(pos..end);
        Ok(removed)
    }

    /// Overwrite up to `len` chars at `pos` with `new_text`, returning what
    /// was overwritten.
    pub fn replace(&mut self, pos: usize, len: usize, new_text: &str) -> EditResult<String> {
        let end = self.checked_span(OperationKind::Replace, pos, len)?;
        let old = self.rope.slice(pos..end).to_string();
        self.rope.remove(pos..end);
        self.rope.insert(pos, new_text);
        Ok(old)
    }

    /// Validate `pos` for delete/replace and return the clamped end index.
    fn checked_span(&self, kind: OperationKind, pos: usize, len: usize) -> EditResult<usize> {
        let total = self.len_chars();
        if pos >= total {
            return Err(EditError::InvalidPosition {
                kind,
                pos,
                len: total,
            });
        }
        Ok(pos + len.min(total - pos))
    }
}
