#![forbid(unsafe_code)]

//! Live tracking state of one interaction.
//!
//! A [`TrackingSession`] follows at most two contacts. It owns the spatial
//! and temporal bookkeeping (start/current point, velocity, two-contact
//! baseline, scale and rotation) and reports phase transitions to the
//! recognizer, which decides what fires.
//!
//! # Phases
//!
//! ```text
//! Idle ──start──▶ SingleActive ──start──▶ MultiActive
//!  ▲                 │    ▲                   │
//!  └──────end────────┘    └───────end─────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `start_point` is `Some` iff `is_tracking`.
//! 2. `scale` and `rotation` are recomputed only while two contacts are down;
//!    their last values are kept until the interaction ends.
//! 3. The shake detector is not touched by interaction start or end.

use tracing::debug;

use crate::event::ContactId;
use crate::geometry::{ContactPoint, Millis, Vec2, normalize_angle};
use crate::shake::ShakeDetector;

/// Maximum simultaneously tracked contacts.
pub const MAX_CONTACTS: usize = 2;

/// Tracking phase derived from the number of active contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingPhase {
    Idle,
    SingleActive,
    MultiActive,
}

/// Why a contact event did not change tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredContact {
    /// A third contact arrived while two were already tracked.
    TooManyContacts,
    /// A start for a contact that is already down.
    AlreadyActive,
    /// A move or end for a contact that is not tracked.
    UnknownContact,
}

/// Result of feeding a contact-start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartOutcome {
    /// Idle → SingleActive. Carries the new interaction number.
    Began { interaction: u64 },
    /// SingleActive → MultiActive; the baseline was captured.
    BecameMulti,
    Ignored(IgnoredContact),
}

/// Result of feeding a contact-move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// The tracked single contact moved; distance from the start point attached.
    Single { distance_from_start: f32 },
    /// One of two contacts moved; scale and rotation were recomputed.
    Multi,
    Ignored(IgnoredContact),
}

/// Result of feeding a contact-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndOutcome {
    /// The last contact lifted; the session was reset.
    Ended(InteractionSummary),
    /// MultiActive → SingleActive.
    BackToSingle,
    Ignored(IgnoredContact),
}

/// Everything end-of-interaction classification needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSummary {
    pub start: ContactPoint,
    pub end: ContactPoint,
    pub velocity: Vec2,
    pub scale: f32,
    pub rotation: f32,
    /// True if two contacts were down at some point.
    pub was_multi: bool,
}

impl InteractionSummary {
    /// Displacement from start to end.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.end.displacement_from(self.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveContact {
    id: ContactId,
    point: ContactPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MultiBaseline {
    distance: f32,
    angle: f32,
}

/// Live state of the in-progress interaction.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    is_tracking: bool,
    start_point: Option<ContactPoint>,
    current_point: Option<ContactPoint>,
    velocity: Vec2,
    scale: f32,
    rotation: f32,
    contacts: [Option<ActiveContact>; MAX_CONTACTS],
    baseline: Option<MultiBaseline>,
    was_multi: bool,
    interaction: u64,
    shake: ShakeDetector,
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingSession {
    /// An idle session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            is_tracking: false,
            start_point: None,
            current_point: None,
            velocity: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            contacts: [None; MAX_CONTACTS],
            baseline: None,
            was_multi: false,
            interaction: 0,
            shake: ShakeDetector::new(),
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    #[inline]
    #[must_use]
    pub const fn start_point(&self) -> Option<ContactPoint> {
        self.start_point
    }

    #[inline]
    #[must_use]
    pub const fn current_point(&self) -> Option<ContactPoint> {
        self.current_point
    }

    /// Total displacement over total elapsed time since start, in px/ms.
    #[inline]
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current two-contact distance over the baseline distance.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Signed angle between the current two-contact vector and the baseline, in radians.
    #[inline]
    #[must_use]
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Qualifying motion samples in the current shake burst.
    #[inline]
    #[must_use]
    pub const fn shake_sample_count(&self) -> u32 {
        self.shake.sample_count()
    }

    /// Number of the current (or last) interaction. Increments on every Idle → SingleActive.
    #[inline]
    #[must_use]
    pub const fn interaction(&self) -> u64 {
        self.interaction
    }

    /// Number of contacts currently down.
    #[must_use]
    pub fn active_contacts(&self) -> usize {
        self.contacts.iter().flatten().count()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TrackingPhase {
        match self.active_contacts() {
            0 => TrackingPhase::Idle,
            1 => TrackingPhase::SingleActive,
            _ => TrackingPhase::MultiActive,
        }
    }

    pub(crate) fn shake_mut(&mut self) -> &mut ShakeDetector {
        &mut self.shake
    }

    // -- Transitions --------------------------------------------------------

    /// Feed a contact-start.
    pub fn contact_start(&mut self, id: ContactId, point: ContactPoint) -> StartOutcome {
        if self.slot_of(id).is_some() {
            return StartOutcome::Ignored(IgnoredContact::AlreadyActive);
        }
        match self.phase() {
            TrackingPhase::Idle => {
                self.reset_contacts();
                self.interaction = self.interaction.wrapping_add(1);
                self.is_tracking = true;
                self.start_point = Some(point);
                self.current_point = Some(point);
                self.contacts[0] = Some(ActiveContact { id, point });
                debug!(interaction = self.interaction, "tracking started");
                StartOutcome::Began {
                    interaction: self.interaction,
                }
            }
            TrackingPhase::SingleActive => {
                let free = if self.contacts[0].is_none() { 0 } else { 1 };
                self.contacts[free] = Some(ActiveContact { id, point });
                self.was_multi = true;
                self.capture_baseline();
                debug!(interaction = self.interaction, "second contact, baseline captured");
                StartOutcome::BecameMulti
            }
            TrackingPhase::MultiActive => {
                debug!(contact = id.0, "ignoring contact beyond two");
                StartOutcome::Ignored(IgnoredContact::TooManyContacts)
            }
        }
    }

    /// Feed a contact-move.
    pub fn contact_move(&mut self, id: ContactId, point: ContactPoint) -> MoveOutcome {
        let Some(slot) = self.slot_of(id) else {
            return MoveOutcome::Ignored(IgnoredContact::UnknownContact);
        };
        self.contacts[slot] = Some(ActiveContact { id, point });

        if self.phase() == TrackingPhase::MultiActive {
            self.update_scale_rotation();
            if slot == 0 {
                self.current_point = Some(point);
            }
            return MoveOutcome::Multi;
        }

        self.track_primary(point);
        let distance_from_start = self
            .start_point
            .map_or(0.0, |start| point.displacement_from(start).length());
        MoveOutcome::Single {
            distance_from_start,
        }
    }

    /// Feed a contact-end.
    pub fn contact_end(&mut self, id: ContactId, point: ContactPoint) -> EndOutcome {
        let Some(slot) = self.slot_of(id) else {
            return EndOutcome::Ignored(IgnoredContact::UnknownContact);
        };

        if self.phase() == TrackingPhase::MultiActive {
            self.contacts[slot] = None;
            if slot == 0 {
                // The remaining contact becomes primary.
                self.contacts.swap(0, 1);
                self.current_point = self.contacts[0].map(|c| c.point);
            }
            self.baseline = None;
            debug!(interaction = self.interaction, "back to single contact");
            return EndOutcome::BackToSingle;
        }

        // Lift position counts as a final move only if the contact actually moved.
        if self.current_point.is_some_and(|c| c.position() != point.position()) {
            self.track_primary(point);
        }
        let summary = self.summary();
        self.reset_contacts();
        debug!(interaction = self.interaction, "tracking ended");
        match summary {
            Some(summary) => EndOutcome::Ended(summary),
            None => EndOutcome::Ignored(IgnoredContact::UnknownContact),
        }
    }

    /// Drop all contact state. The shake detector and interaction counter survive.
    pub fn reset_contacts(&mut self) {
        self.is_tracking = false;
        self.start_point = None;
        self.current_point = None;
        self.velocity = Vec2::ZERO;
        self.scale = 1.0;
        self.rotation = 0.0;
        self.contacts = [None; MAX_CONTACTS];
        self.baseline = None;
        self.was_multi = false;
    }

    // -- Internals ----------------------------------------------------------

    fn slot_of(&self, id: ContactId) -> Option<usize> {
        self.contacts
            .iter()
            .position(|c| c.is_some_and(|c| c.id == id))
    }

    fn track_primary(&mut self, point: ContactPoint) {
        self.current_point = Some(point);
        if let Some(start) = self.start_point {
            let elapsed = point.elapsed_since(start);
            self.velocity = point.displacement_from(start).per(elapsed as f32);
        }
    }

    fn pair_vector(&self) -> Option<Vec2> {
        match self.contacts {
            [Some(a), Some(b)] => Some(b.point.position() - a.point.position()),
            _ => None,
        }
    }

    fn capture_baseline(&mut self) {
        self.baseline = self.pair_vector().map(|v| MultiBaseline {
            distance: v.length(),
            angle: v.angle(),
        });
    }

    fn update_scale_rotation(&mut self) {
        let (Some(baseline), Some(v)) = (self.baseline, self.pair_vector()) else {
            return;
        };
        if baseline.distance > 0.0 {
            self.scale = v.length() / baseline.distance;
        }
        self.rotation = normalize_angle(v.angle() - baseline.angle);
    }

    fn summary(&self) -> Option<InteractionSummary> {
        Some(InteractionSummary {
            start: self.start_point?,
            end: self.current_point?,
            velocity: self.velocity,
            scale: self.scale,
            rotation: self.rotation,
            was_multi: self.was_multi,
        })
    }
}

/// Milliseconds between two optional timestamps, if both exist and are ordered.
#[must_use]
pub fn gap_ms(earlier: Option<Millis>, later: Millis) -> Option<Millis> {
    earlier.and_then(|e| later.checked_sub(e))
}
