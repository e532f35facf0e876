//! Per-page undo/redo history with text-edit coalescing.
//!
//! DESIGN
//! ======
//! History is keyed by `(document, page)`; undo never crosses pages. Each
//! entry is a deep copy of the page's annotation list taken strictly before
//! the mutation that triggered it, so restoring is a plain list swap.
//!
//! Structural edits push one snapshot each. Keystrokes go through
//! [`History::record_typing`], which only snapshots at the start of a burst:
//! an explicit [`TypingState`] carries the deadline after which the next
//! keystroke starts a new burst.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::doc::{Annotation, DocumentId};

/// Deep copy of one page's annotation list, in store order.
pub type PageSnapshot = Vec<Annotation>;

/// Identifies one page of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub document: DocumentId,
    pub page: usize,
}

impl PageKey {
    #[must_use]
    pub fn new(document: DocumentId, page: usize) -> Self {
        Self { document, page }
    }
}

/// Text-edit coalescing state for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingState {
    /// No burst in progress; the next keystroke snapshots.
    #[default]
    Idle,
    /// A burst is in progress until `deadline`.
    Typing { deadline: Instant },
}

impl TypingState {
    /// Whether a keystroke at `now` continues the current burst.
    #[must_use]
    pub fn continues_at(&self, now: Instant) -> bool {
        match self {
            Self::Idle => false,
            Self::Typing { deadline } => now < *deadline,
        }
    }
}

#[derive(Debug, Default)]
struct PageHistory {
    past: Vec<PageSnapshot>,
    future: Vec<PageSnapshot>,
    typing: TypingState,
}

/// Undo/redo stacks for every page that has been edited.
#[derive(Debug)]
pub struct History {
    pages: HashMap<PageKey, PageHistory>,
    max_depth: usize,
    idle_window: Duration,
}

impl History {
    #[must_use]
    pub fn new(max_depth: usize, idle_window: Duration) -> Self {
        Self { pages: HashMap::new(), max_depth: max_depth.max(1), idle_window }
    }

    /// Push the pre-mutation state of a page. Clears redo and ends any
    /// typing burst.
    pub fn record(&mut self, key: PageKey, snapshot: PageSnapshot) {
        let max_depth = self.max_depth;
        let entry = self.pages.entry(key).or_default();
        entry.past.push(snapshot);
        if entry.past.len() > max_depth {
            let overflow = entry.past.len() - max_depth;
            entry.past.drain(..overflow);
        }
        entry.future.clear();
        entry.typing = TypingState::Idle;
        tracing::debug!(page = key.page, depth = entry.past.len(), "history recorded");
    }

    /// Register a keystroke at `now`. Snapshots (via `snapshot`) only when the
    /// keystroke starts a new burst. Returns whether a snapshot was pushed.
    pub fn record_typing<F>(&mut self, key: PageKey, now: Instant, snapshot: F) -> bool
    where
        F: FnOnce() -> PageSnapshot,
    {
        let continues = self.pages.get(&key).is_some_and(|h| h.typing.continues_at(now));
        if !continues {
            self.record(key, snapshot());
        }
        let deadline = now + self.idle_window;
        self.pages.entry(key).or_default().typing = TypingState::Typing { deadline };
        !continues
    }

    /// Force the next keystroke on `key` to start a new burst.
    pub fn end_typing(&mut self, key: PageKey) {
        if let Some(entry) = self.pages.get_mut(&key) {
            entry.typing = TypingState::Idle;
        }
    }

    /// Pop the most recent snapshot, parking `current` on the redo stack.
    /// Returns `None` (and drops nothing) when there is nothing to undo.
    pub fn undo(&mut self, key: PageKey, current: PageSnapshot) -> Option<PageSnapshot> {
        let entry = self.pages.get_mut(&key)?;
        let restored = entry.past.pop()?;
        entry.future.push(current);
        entry.typing = TypingState::Idle;
        tracing::debug!(page = key.page, undo = entry.past.len(), redo = entry.future.len(), "undo");
        Some(restored)
    }

    /// Mirror of [`History::undo`].
    pub fn redo(&mut self, key: PageKey, current: PageSnapshot) -> Option<PageSnapshot> {
        let entry = self.pages.get_mut(&key)?;
        let restored = entry.future.pop()?;
        entry.past.push(current);
        entry.typing = TypingState::Idle;
        tracing::debug!(page = key.page, undo = entry.past.len(), redo = entry.future.len(), "redo");
        Some(restored)
    }

    #[must_use]
    pub fn can_undo(&self, key: PageKey) -> bool {
        self.undo_len(key) > 0
    }

    #[must_use]
    pub fn can_redo(&self, key: PageKey) -> bool {
        self.redo_len(key) > 0
    }

    #[must_use]
    pub fn undo_len(&self, key: PageKey) -> usize {
        self.pages.get(&key).map_or(0, |h| h.past.len())
    }

    #[must_use]
    pub fn redo_len(&self, key: PageKey) -> usize {
        self.pages.get(&key).map_or(0, |h| h.future.len())
    }

    #[must_use]
    pub fn typing_state(&self, key: PageKey) -> TypingState {
        self.pages.get(&key).map_or(TypingState::Idle, |h| h.typing)
    }

    /// Drop every page history belonging to `document`.
    pub fn clear_document(&mut self, document: DocumentId) {
        self.pages.retain(|key, _| key.document != document);
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}
