#![forbid(unsafe_code)]

//! Bounded gesture history and the transient feedback flag.

use std::collections::VecDeque;

use crate::geometry::Millis;
use crate::gesture::GestureEvent;

/// Most-recent-first log of fired gestures with a fixed capacity.
///
/// Pushing into a full history evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct GestureHistory {
    entries: VecDeque<GestureEvent>,
    capacity: usize,
}

impl GestureHistory {
    /// Create an empty history holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a gesture as the most recent entry.
    pub fn push(&mut self, event: GestureEvent) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(event);
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &GestureEvent> {
        self.entries.iter()
    }

    /// Entries copied out, most recent first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<GestureEvent> {
        self.entries.iter().copied().collect()
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&GestureEvent> {
        self.entries.front()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// "Feedback active" indicator shown after a gesture fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackState {
    /// When the flag was last raised, if it is up.
    pub active_since: Option<Millis>,
    /// When the flag is scheduled to drop.
    pub expires_at: Option<Millis>,
}

impl FeedbackState {
    /// Whether the flag is up.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active_since.is_some()
    }
}
