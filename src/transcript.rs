use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::Entry;

/// Where rendered entries end up. The browser front end backs this with
/// signals, the terminal client prints, tests keep everything in memory.
pub trait TranscriptView: Send + Sync {
    /// Adds `entry` after every existing entry.
    fn push(&self, entry: Entry);

    /// Reveals the newest entry.
    fn scroll_to_latest(&self);

    /// Drops every entry and starts over with `entry`.
    fn replace_all(&self, entry: Entry);
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    scrolled_to: Option<usize>,
}

/// In-memory, append-only transcript.
#[derive(Default)]
pub struct Transcript {
    inner: Mutex<Inner>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the entries in display order.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Index of the entry the view was last scrolled to.
    pub fn scrolled_to(&self) -> Option<usize> {
        self.lock().scrolled_to
    }
}

impl TranscriptView for Transcript {
    fn push(&self, entry: Entry) {
        self.lock().entries.push(entry);
    }

    fn scroll_to_latest(&self) {
        let mut inner = self.lock();
        inner.scrolled_to = inner.entries.len().checked_sub(1);
    }

    fn replace_all(&self, entry: Entry) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.entries.push(entry);
        inner.scrolled_to = None;
    }
}
