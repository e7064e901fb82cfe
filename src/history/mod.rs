// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Interlinea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Interlinea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bounded linear undo/redo history over whole-state snapshots.
//!
//! Callers `save` the pre-image *before* applying an undoable change. The first `undo`
//! after such a change also captures the live (post-change) state so `redo` can return
//! to it. Saving after an undo discards the redo branch.

use tracing::trace;

pub const DEFAULT_CAPACITY: usize = 50;

/// Snapshot log with a cursor.
///
/// Invariant: when non-empty, `cursor < entries.len()`. At most `capacity` pre-images are
/// kept; the live state captured by the first undo may occupy one slot past that.
#[derive(Debug, Clone, PartialEq)]
pub struct History<S> {
    entries: Vec<S>,
    cursor: usize,
    capacity: usize,
    /// True when `entries[cursor]` equals the live state (right after an undo/redo).
    at_snapshot: bool,
}

impl<S: Clone> History<S> {
    /// A zero capacity is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::new(), cursor: 0, capacity: capacity.max(1), at_snapshot: false }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current snapshot, `None` when the log is empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    pub fn entries(&self) -> &[S] {
        &self.entries
    }

    /// Records `state` as the pre-image of the change about to be applied.
    pub fn save(&mut self, state: &S) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        if self.at_snapshot {
            // The live state is already stored at the cursor; only the redo branch goes.
            self.at_snapshot = false;
            self.evict_overflow();
            trace!(len = self.entries.len(), cursor = self.cursor, "history save (branch pruned)");
            return;
        }
        self.entries.push(state.clone());
        self.cursor = self.entries.len() - 1;
        self.evict_overflow();
        trace!(len = self.entries.len(), cursor = self.cursor, "history save");
    }

    /// Steps back one snapshot and returns the state to restore, or `None` at the
    /// boundary.
    pub fn undo(&mut self, live: &S) -> Option<S> {
        if self.entries.is_empty() {
            return None;
        }
        if !self.at_snapshot {
            // Keep the live state so redo can return to it. Never evicts.
            self.entries.push(live.clone());
            self.cursor = self.entries.len() - 1;
        }
        if self.cursor == 0 {
            self.at_snapshot = true;
            return None;
        }
        self.cursor -= 1;
        self.at_snapshot = true;
        trace!(len = self.entries.len(), cursor = self.cursor, "history undo");
        Some(self.entries[self.cursor].clone())
    }

    /// Steps forward one snapshot and returns the state to restore, or `None` when there
    /// is nothing to redo.
    pub fn redo(&mut self) -> Option<S> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.at_snapshot = true;
        trace!(len = self.entries.len(), cursor = self.cursor, "history redo");
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && (self.cursor > 0 || !self.at_snapshot)
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.at_snapshot = false;
    }

    /// Drops the oldest snapshots beyond `capacity`, shifting the cursor with them.
    fn evict_overflow(&mut self) {
        let overflow = self.entries.len().saturating_sub(self.capacity);
        if overflow == 0 {
            return;
        }
        self.entries.drain(..overflow);
        self.cursor = self.cursor.saturating_sub(overflow);
    }
}

impl<S: Clone> Default for History<S> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
