#![forbid(unsafe_code)]

//! Error taxonomy for buffer edits and history navigation.
//!
//! None of these conditions is fatal. A buffer-level [`EditError::InvalidPosition`]
//! leaves the text untouched, and the empty-stack variants leave the whole
//! engine untouched, so callers can report them and carry on.

use std::fmt;

use thiserror::Error;

/// Which buffer primitive rejected a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperationKind {
    Insert,
    Delete,
    Replace,
}

impl OperationKind {
    /// Capitalised label used in user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Insert => "Insert",
            Self::Delete => "Delete",
            Self::Replace => "Replace",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors reported by [`TextBuffer`](crate::TextBuffer) and
/// [`HistoryEngine`](crate::HistoryEngine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The position is outside the range accepted by the primitive.
    ///
    /// Insert accepts `pos <= len`; delete and replace accept `pos < len`.
    #[error("{kind}: invalid position {pos} (length {len})")]
    InvalidPosition {
        kind: OperationKind,
        pos: usize,
        len: usize,
    },
    /// `undo` was called with an empty undo stack.
    #[error("Nothing to undo")]
    NothingToUndo,
    /// `redo` was called with an empty redo stack.
    #[error("Nothing to redo")]
    NothingToRedo,
}

impl EditError {
    /// True for the empty-stack conditions, which never touch any state.
    #[must_use]
    pub fn is_empty_history(&self) -> bool {
        matches!(self, Self::NothingToUndo | Self::NothingToRedo)
    }
}

/// Result alias used throughout the crate.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_position_display_names_the_primitive() {
        let err = EditError::InvalidPosition {
            kind: OperationKind::Delete,
            pos: 5,
            len: 5,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Delete: invalid position"));
        assert!(msg.contains('5'));
    }

    #[test]
    fn empty_history_classification() {
        assert!(EditError::NothingToUndo.is_empty_history());
        assert!(EditError::NothingToRedo.is_empty_history());
        let err = EditError::InvalidPosition {
            kind: OperationKind::Insert,
            pos: 1,
            len: 0,
        };
        assert!(!err.is_empty_history());
    }

    #[test]
    fn empty_history_messages() {
        assert_eq!(EditError::NothingToUndo.to_string(), "Nothing to undo");
        assert_eq!(EditError::NothingToRedo.to_string(), "Nothing to redo");
    }
}
