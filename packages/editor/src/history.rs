//! # Undo/Redo History
//!
//! Bounded list of document checkpoints with a cursor.
//!
//! ## Design
//!
//! - Checkpoints are whole-document snapshots shared with the live state
//!   through `Arc`; committing never copies a document
//! - Committing truncates everything after the cursor, then appends
//! - Oldest checkpoints are evicted once the limit is exceeded
//! - The history is never empty: `index` always points at a checkpoint
//!
//! ```text
//! commit(D3):   [D0 D1 D2*]      → [D0 D1 D2 D3*]
//! undo:         [D0 D1 D2 D3*]   → [D0 D1 D2* D3]
//! commit(D4):   [D0 D1 D2* D3]   → [D0 D1 D2 D4*]
//! ```

use sitecraft_model::Document;
use std::sync::Arc;

/// Default number of checkpoints kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    checkpoints: Vec<Arc<Document>>,
    index: usize,
    limit: usize,
}

impl History {
    /// History holding only `initial`
    pub fn new(initial: Arc<Document>, limit: usize) -> Self {
        Self {
            checkpoints: vec![initial],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Append a checkpoint after the cursor, dropping any redo entries
    ///
    /// No de-duplication: committing the same document twice stores it twice.
    pub fn commit(&mut self, document: Arc<Document>) {
        self.checkpoints.truncate(self.index + 1);
        self.checkpoints.push(document);

        if self.checkpoints.len() > self.limit {
            let excess = self.checkpoints.len() - self.limit;
            self.checkpoints.drain(..excess);
        }

        self.index = self.checkpoints.len() - 1;
    }

    /// Step back; `None` at the oldest checkpoint
    pub fn undo(&mut self) -> Option<Arc<Document>> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Step forward; `None` at the newest checkpoint
    pub fn redo(&mut self) -> Option<Arc<Document>> {
        if self.index + 1 >= self.checkpoints.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Drop everything and start over from `document`
    pub fn reset(&mut self, document: Arc<Document>) {
        self.checkpoints.clear();
        self.checkpoints.push(document);
        self.index = 0;
    }

    pub fn current(&self) -> Arc<Document> {
        Arc::clone(&self.checkpoints[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.checkpoints.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Always false; a history holds at least one checkpoint
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn checkpoints(&self) -> &[Arc<Document>] {
        &self.checkpoints
    }
}
