#![forbid(unsafe_code)]

//! Linear undo/redo history over a [`TextBuffer`].
//!
//! [`HistoryEngine`] owns the buffer and two stacks of [`Operation`] values:
//!
//! - **Undo and redo share one mechanism**: take the top operation, build its
//!   inverse, apply it, move the operation to the other stack.
//! - **Branch handling**: `execute` clears the redo stack.
//! - **Limits**: optional depth and memory budgets evict the oldest history.
//!
//! # Invariants
//!
//! 1. The redo stack is empty after every `execute`.
//! 2. Every operation lives on exactly one stack.
//! 3. `total_bytes` equals the sum of `size_bytes()` over both stacks.
//! 4. `undo_stack.len() <= config.max_depth` after any operation.
//!
//! ```text
//! execute(op3)
//! ┌───────────────────────────────────────────────┐
//! │ Undo Stack: [op1, op2, op3]                   │
//! │ Redo Stack: []                                │
//! └───────────────────────────────────────────────┘
//!
//! undo() x2       apply(op3.invert()), apply(op2.invert())
//! ┌───────────────────────────────────────────────┐
//! │ Undo Stack: [op1]                             │
//! │ Redo Stack: [op3, op2]                        │
//! └───────────────────────────────────────────────┘
//!
//! redo()          apply(op2.invert().invert())
//! ┌───────────────────────────────────────────────┐
//! │ Undo Stack: [op1, op2]                        │
//! │ Redo Stack: [op3]                             │
//! └───────────────────────────────────────────────┘
//!
//! execute(op4)    op3 is gone for good
//! ┌───────────────────────────────────────────────┐
//! │ Undo Stack: [op1, op2, op4]                   │
//! │ Redo Stack: []                                │
//! └───────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::buffer::TextBuffer;
use crate::error::{EditError, EditResult};
use crate::operation::Operation;

/// What `execute` does with an operation whose `apply` reported
/// [`EditError::InvalidPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InvalidOpPolicy {
    /// Record the no-op on the undo stack anyway and clear the redo stack.
    #[default]
    Track,
    /// Leave both stacks exactly as they were.
    Reject,
}

/// Configuration for the history engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct HistoryConfig {
    /// Maximum number of operations kept for undo.
    pub max_depth: usize,
    /// Maximum total bytes across both stacks (0 = unlimited).
    pub max_bytes: usize,
    /// Handling of operations that did not apply.
    pub invalid_ops: InvalidOpPolicy,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl HistoryConfig {
    /// Create a configuration with custom limits.
    #[must_use]
    pub fn new(max_depth: usize, max_bytes: usize) -> Self {
        Self {
            max_depth,
            max_bytes,
            invalid_ops: InvalidOpPolicy::default(),
        }
    }

    /// No depth or memory limit.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(usize::MAX, 0)
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use]
    pub fn with_invalid_ops(mut self, policy: InvalidOpPolicy) -> Self {
        self.invalid_ops = policy;
        self
    }

    /// Validate the limits.
    ///
    /// Returns a list of problems; empty means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push("history.max_depth must be > 0".into());
        }
        errors
    }
}

/// Owner of the document text and its undo/redo history.
pub struct HistoryEngine {
    buffer: TextBuffer,
    /// Operations available for undo (newest at back).
    undo_stack: VecDeque<Operation>,
    /// Operations available for redo (newest at back).
    redo_stack: VecDeque<Operation>,
    config: HistoryConfig,
    total_bytes: usize,
}

impl fmt::Debug for HistoryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryEngine")
            .field("len_chars", &self.buffer.len_chars())
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("total_bytes", &self.total_bytes)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl HistoryEngine {
    /// Create an engine with an empty buffer.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_text("", config)
    }

    /// Create an engine whose buffer starts out holding `text`.
    ///
    /// The initial text is not part of the history and cannot be undone.
    #[must_use]
    pub fn with_text(text: &str, config: HistoryConfig) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            config,
            total_bytes: 0,
        }
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Apply `op`, record it for undo and discard the redo history.
    ///
    /// An [`EditError::InvalidPosition`] is a report, not a failure: the
    /// buffer is unchanged, and under [`InvalidOpPolicy::Track`] the no-op is
    /// still recorded.
    pub fn execute(&mut self, mut op: Operation) -> EditResult<()> {
        let outcome = op.apply(&mut self.buffer);
        if let Err(ref err) = outcome {
            tracing::warn!(op = %op, error = %err, policy = ?self.config.invalid_ops, "execute: operation had no effect");
            if self.config.invalid_ops == InvalidOpPolicy::Reject {
                return outcome;
            }
        }

        self.clear_redo();
        self.total_bytes += op.size_bytes();
        tracing::debug!(
            op = %op,
            undo_depth = self.undo_stack.len() + 1,
            len_chars = self.buffer.len_chars(),
            "execute"
        );
        self.undo_stack.push_back(op);
        self.enforce_limits();
        outcome
    }

    /// Revert the most recent operation.
    ///
    /// Returns [`EditError::NothingToUndo`] without touching any state when
    /// the undo stack is empty. If the inverse reports an invalid position
    /// the operation still moves to the redo stack and the error is returned.
    pub fn undo(&mut self) -> EditResult<()> {
        let Some(op) = self.undo_stack.pop_back() else {
            tracing::debug!("undo: nothing to undo");
            return Err(EditError::NothingToUndo);
        };

        let mut inverse = op.invert();
        let outcome = inverse.apply(&mut self.buffer);
        if let Err(ref err) = outcome {
            tracing::warn!(op = %op, inverse = %inverse, error = %err, "undo: inverse had no effect");
        }
        tracing::debug!(
            op = %op,
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len() + 1,
            "undo"
        );
        self.redo_stack.push_back(op);
        outcome
    }

    /// Re-apply the most recently undone operation.
    ///
    /// The forward effect is recovered by inverting the inverse, so redo runs
    /// through the same `invert` primitive as undo. The original operation
    /// goes back on the undo stack; its captured fields still describe the
    /// edit because the buffer is back in the state it was first applied to.
    ///
    /// An operation that was out of bounds when executed is out of bounds
    /// again here, and stays a no-op.
    pub fn redo(&mut self) -> EditResult<()> {
        let Some(op) = self.redo_stack.pop_back() else {
            tracing::debug!("redo: nothing to redo");
            return Err(EditError::NothingToRedo);
        };

        let mut forward = op.invert().invert();
        let outcome = op
            .check(&self.buffer)
            .and_then(|()| forward.apply(&mut self.buffer));
        if let Err(ref err) = outcome {
            tracing::warn!(op = %op, forward = %forward, error = %err, "redo: operation had no effect");
        }
        tracing::debug!(
            op = %op,
            undo_depth = self.undo_stack.len() + 1,
            redo_depth = self.redo_stack.len(),
            "redo"
        );
        self.undo_stack.push_back(op);
        outcome
    }

    /// Snapshot of the current document text.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.buffer.text()
    }

    /// Read-only access to the buffer.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Operations available for undo, most recent first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &Operation> {
        self.undo_stack.iter().rev()
    }

    /// Operations available for redo, most recent first.
    pub fn redo_entries(&self) -> impl Iterator<Item = &Operation> {
        self.redo_stack.iter().rev()
    }

    /// Descriptions for undo operations (most recent first).
    pub fn undo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.undo_entries()
            .take(limit)
            .map(Operation::description)
            .collect()
    }

    /// Descriptions for redo operations (most recent first).
    pub fn redo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.redo_entries()
            .take(limit)
            .map(Operation::description)
            .collect()
    }

    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(Operation::description)
    }

    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(Operation::description)
    }

    /// Bytes held by both stacks.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.total_bytes
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop all history. The text is kept.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.total_bytes = 0;
    }

    fn clear_redo(&mut self) {
        if !self.redo_stack.is_empty() {
            tracing::debug!(discarded = self.redo_stack.len(), "discarding redo history");
        }
        for op in self.redo_stack.drain(..) {
            self.total_bytes = self.total_bytes.saturating_sub(op.size_bytes());
        }
    }

    /// Evict the oldest undo entries until depth and memory limits hold.
    ///
    /// Only called from `execute`, after the redo stack has been cleared.
    fn enforce_limits(&mut self) {
        let max_bytes = self.config.max_bytes;
        while self.undo_stack.len() > self.config.max_depth
            || (max_bytes > 0 && self.total_bytes > max_bytes)
        {
            let Some(op) = self.undo_stack.pop_front() else {
                break;
            };
            tracing::debug!(op = %op, "evicting oldest undo entry");
            self.total_bytes = self.total_bytes.saturating_sub(op.size_bytes());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
