//! Snapshot-based undo/redo.

use crate::elements::DrawingElement;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};

/// Default number of snapshots kept before the oldest is dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// An immutable copy of the document at a committed point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// All elements in z-order.
    pub elements: Vec<DrawingElement>,
    pub selection: Selection,
}

/// Linear undo/redo over a sequence of snapshots.
///
/// The snapshot at `cursor` always mirrors the last committed state.
/// There is always at least one snapshot.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    snapshots: Vec<HistorySnapshot>,
    cursor: usize,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(HistorySnapshot::default(), DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryManager {
    /// Start a history whose oldest state is `initial`.
    pub fn new(initial: HistorySnapshot, limit: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new state, discarding anything that could have been redone.
    pub fn commit(&mut self, snapshot: HistorySnapshot) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns `None` at the oldest.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one snapshot. Returns `None` at the newest.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &HistorySnapshot {
        &self.snapshots[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
