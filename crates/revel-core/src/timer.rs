#![forbid(unsafe_code)]

//! Cancellable scheduled tasks on a host-driven clock.
//!
//! [`TimerQueue`] never sleeps and never spawns. The owner schedules payloads
//! at absolute deadlines and later drains whatever is due with
//! [`TimerQueue::pop_due`], typically from the host's animation-frame or
//! interval callback. Every scheduled entry is addressed by a [`TimerHandle`];
//! cancelling a handle guarantees its payload is never returned.
//!
//! # Invariants
//!
//! 1. Entries are returned in deadline order; ties resolve in scheduling order.
//! 2. A cancelled or already-fired handle is inert: cancelling it again is a no-op.
//! 3. After [`TimerQueue::clear`], no previously scheduled payload is returned.

use crate::geometry::Millis;

/// Handle to one scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    handle: TimerHandle,
    due_at: Millis,
    payload: T,
}

/// Deadline-ordered set of cancellable payloads.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_id: u64,
    // Sorted by (due_at, handle). Only a couple of timers are ever live, so a
    // Vec beats a heap here and keeps cancellation trivial.
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `payload` to become due at `due_at`.
    pub fn schedule(&mut self, due_at: Millis, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let at = self
            .pending
            .partition_point(|entry| entry.due_at <= due_at);
        self.pending.insert(
            at,
            Scheduled {
                handle,
                due_at,
                payload,
            },
        );
        handle
    }

    /// Cancel a scheduled entry. Returns `true` if it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending.iter().position(|entry| entry.handle == handle) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `handle` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|entry| entry.handle == handle)
    }

    /// Remove and return the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, T)> {
        if self.pending.first()?.due_at > now {
            return None;
        }
        let entry = self.pending.remove(0);
        Some((entry.due_at, entry.payload))
    }

    /// Deadline of the earliest pending entry.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.first().map(|entry| entry.due_at)
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
