//! Undo/redo history over whole-document snapshots.
//!
//! Two stacks plus a `present` pointer. Snapshots are structural copies
//! (`past`, `future`, and `present` never alias), which keeps the history
//! correct no matter how complex the operation that produced a checkpoint
//! was. Documents are small (tens of KB), so copying wins over a patch log.

use crate::errors::{EngineError, EngineResult};
use crate::models::document::Document;

const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct DocumentHistory {
    past: Vec<Document>,
    present: Document,
    future: Vec<Document>,
    limit: usize,
}

impl DocumentHistory {
    pub fn new(initial: Document) -> Self {
        Self::with_limit(initial, DEFAULT_LIMIT)
    }

    /// History bounded to `limit` undo steps; the oldest snapshot is evicted
    /// when the bound is hit.
    pub fn with_limit(initial: Document, limit: usize) -> Self {
        DocumentHistory {
            past: Vec::new(),
            present: initial,
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// The live document.
    pub fn present(&self) -> &Document {
        &self.present
    }

    /// Records `doc` as the new present state. The previous present moves to
    /// the undo stack and any redo states are discarded.
    ///
    /// Callers checkpoint after semantically complete edits (field blur, a
    /// completed drag), not per keystroke; debouncing is their job.
    pub fn checkpoint(&mut self, doc: Document) {
        let previous = std::mem::replace(&mut self.present, doc);
        self.past.push(previous);
        if self.past.len() > self.limit {
            self.past.remove(0);
        }
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Steps back one checkpoint. Fails with `CannotUndo` when the undo
    /// stack is empty, leaving the state untouched.
    pub fn undo(&mut self) -> EngineResult<&Document> {
        let restored = self.past.pop().ok_or(EngineError::CannotUndo)?;
        let displaced = std::mem::replace(&mut self.present, restored);
        self.future.push(displaced);
        Ok(&self.present)
    }

    /// Steps forward one checkpoint. Symmetric to `undo`.
    pub fn redo(&mut self) -> EngineResult<&Document> {
        let restored = self.future.pop().ok_or(EngineError::CannotRedo)?;
        let displaced = std::mem::replace(&mut self.present, restored);
        self.past.push(displaced);
        Ok(&self.present)
    }

    /// Number of recorded undo steps.
    pub fn depth(&self) -> usize {
        self.past.len()
    }
}
