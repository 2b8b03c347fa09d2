// src/history.rs - Bounded linear undo/redo history

use log::debug;
use std::collections::VecDeque;

/// Maximum number of snapshots kept; the oldest is dropped beyond this.
pub const HISTORY_LIMIT: usize = 200;

/// A recorded buffer state and where the caret goes when it is restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub text: String,
    pub cursor: usize,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            cursor,
        }
    }
}

/// Linear snapshot history. Never empty; `index` always points at the
/// current snapshot and everything after it is redo state.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    index: usize,
    limit: usize,
}

impl History {
    pub fn new(initial: HistoryEntry) -> Self {
        Self::with_limit(initial, HISTORY_LIMIT)
    }

    /// `limit` is raised to 1 if zero is given.
    pub fn with_limit(initial: HistoryEntry, limit: usize) -> Self {
        let mut entries = VecDeque::with_capacity(limit.clamp(1, HISTORY_LIMIT));
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            limit: limit.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Record a new current state, discarding any redo states.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(entry);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
        debug!(
            "history push: {} entries, cursor {}",
            self.entries.len(),
            self.current().cursor
        );
    }

    /// Step back one snapshot. `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        debug!("history undo -> {}/{}", self.index, self.entries.len());
        Some(&self.entries[self.index])
    }

    /// Step forward one snapshot. `None` when already at the newest.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        debug!("history redo -> {}/{}", self.index, self.entries.len());
        Some(&self.entries[self.index])
    }

    /// Collapse to a single snapshot.
    pub fn reset(&mut self, entry: HistoryEntry) {
        self.entries.clear();
        self.entries.push_back(entry);
        self.index = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HistoryEntry::new("", 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(n.to_string(), n)
    }

    #[test]
    fn test_new_history_has_one_entry() {
        let history = History::new(entry(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_walks_entries() {
        let mut history = History::new(entry(0));
        history.push(entry(1));
        history.push(entry(2));

        assert_eq!(history.undo().unwrap(), &entry(1));
        assert_eq!(history.undo().unwrap(), &entry(0));
        assert!(history.undo().is_none());
        assert_eq!(history.index(), 0);

        assert_eq!(history.redo().unwrap(), &entry(1));
        assert_eq!(history.redo().unwrap(), &entry(2));
        assert!(history.redo().is_none());
        assert_eq!(history.index(), 2);
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let mut history = History::new(entry(0));
        history.push(entry(1));
        history.push(entry(2));
        history.undo();
        history.undo();
        history.push(entry(9));

        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 1);
        assert_eq!(history.current(), &entry(9));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut history = History::new(entry(0));
        for n in 1..HISTORY_LIMIT {
            history.push(entry(n));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.entries().next().unwrap(), &entry(0));

        history.push(entry(HISTORY_LIMIT));
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.index(), HISTORY_LIMIT - 1);
        assert_eq!(history.entries().next().unwrap(), &entry(1));
        assert_eq!(history.current(), &entry(HISTORY_LIMIT));
    }

    #[test]
    fn test_reset_collapses() {
        let mut history = History::new(entry(0));
        history.push(entry(1));
        history.push(entry(2));
        history.undo();
        history.reset(entry(7));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert_eq!(history.current(), &entry(7));
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let mut history = History::with_limit(entry(0), 0);
        history.push(entry(1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &entry(1));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push,
        Undo,
        Redo,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![3 => Just(Op::Push), 1 => Just(Op::Undo), 1 => Just(Op::Redo)]
    }

    proptest! {
        #[test]
        fn index_stays_valid(ops in prop::collection::vec(op(), 0..600), limit in 1usize..40) {
            let mut history = History::with_limit(entry(0), limit);
            for (n, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Push => {
                        history.push(entry(n + 1));
                        prop_assert_eq!(history.index(), history.len() - 1);
                    }
                    Op::Undo => { history.undo(); }
                    Op::Redo => { history.redo(); }
                }
                prop_assert!(history.len() >= 1);
                prop_assert!(history.len() <= limit);
                prop_assert!(history.index() < history.len());
            }
        }
    }
}
