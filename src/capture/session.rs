// SPDX-License-Identifier: GPL-3.0-only

//! Session review buffer
//!
//! Ephemeral, most-recent-first log of captures taken during the current
//! session, independent of album membership. Holds media references only;
//! the canonical records stay with the library engine, and removals here are
//! paired with a library delete by the controller.

use crate::media::MediaRef;

/// Outcome of removing an entry from the review buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedCapture {
    /// The reference that was removed
    pub media: MediaRef,
    /// Whether the review view should close (the buffer is now empty)
    pub close_review: bool,
}

/// Ordered per-session capture log with a shown index for paging
#[derive(Debug, Default)]
pub struct ReviewBuffer {
    items: Vec<MediaRef>,
    shown: usize,
}

impl ReviewBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new capture (most recent first)
    pub fn push_front(&mut self, media: MediaRef) {
        self.items.insert(0, media);
    }

    /// All session captures, most recent first
    pub fn items(&self) -> &[MediaRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The most recent capture, if any
    pub fn latest(&self) -> Option<&MediaRef> {
        self.items.first()
    }

    /// Currently shown index
    pub fn shown_index(&self) -> usize {
        self.shown
    }

    /// Move the shown index, clamped to the buffer
    pub fn show(&mut self, index: usize) {
        self.shown = index.min(self.items.len().saturating_sub(1));
    }

    /// Remove the entry at `index`.
    ///
    /// If removal empties the buffer the review view closes; if the removed
    /// entry was the last one shown, the shown index clamps to the new last
    /// element. Returns `None` for an out-of-range index.
    pub fn remove(&mut self, index: usize) -> Option<RemovedCapture> {
        if index >= self.items.len() {
            return None;
        }
        let media = self.items.remove(index);
        let close_review = self.items.is_empty();
        if !close_review && self.shown >= self.items.len() {
            self.shown = self.items.len() - 1;
        }
        Some(RemovedCapture {
            media,
            close_review,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(tag: &str) -> MediaRef {
        MediaRef::remote(format!("https://example.com/{tag}"))
    }

    #[test]
    fn test_most_recent_first() {
        let mut buffer = ReviewBuffer::new();
        buffer.push_front(media("a"));
        buffer.push_front(media("b"));
        assert_eq!(buffer.latest(), Some(&media("b")));
        assert_eq!(buffer.items(), &[media("b"), media("a")]);
    }

    #[test]
    fn test_removing_last_entry_closes_review() {
        let mut buffer = ReviewBuffer::new();
        buffer.push_front(media("only"));
        let removed = buffer.remove(0).unwrap();
        assert!(removed.close_review);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_shown_index_clamps_after_removal() {
        let mut buffer = ReviewBuffer::new();
        buffer.push_front(media("a"));
        buffer.push_front(media("b"));
        buffer.push_front(media("c"));
        buffer.show(2);

        let removed = buffer.remove(2).unwrap();
        assert!(!removed.close_review);
        assert_eq!(removed.media, media("a"));
        assert_eq!(buffer.shown_index(), 1);
    }

    #[test]
    fn test_out_of_range_removal_is_none() {
        let mut buffer = ReviewBuffer::new();
        buffer.push_front(media("a"));
        assert!(buffer.remove(5).is_none());
        assert_eq!(buffer.len(), 1);
    }
}
