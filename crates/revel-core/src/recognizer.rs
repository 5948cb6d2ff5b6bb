#![forbid(unsafe_code)]

//! Gesture recognition: normalized input events → semantic gestures.
//!
//! [`GestureRecognizer`] owns the tracking session, the gesture registry, the
//! timer queue, and the history. It is driven entirely by the host:
//! [`process`](GestureRecognizer::process) for each normalized event and
//! [`tick`](GestureRecognizer::tick) from the host's frame or interval
//! callback so that long-press and feedback expiry fire on time.
//!
//! # Classification
//!
//! - **Long press**: scheduled when a single contact goes down; fires from the
//!   timer if the contact is still down, still single, and has not moved
//!   beyond the slop.
//! - **Swipe** and **double tap**: evaluated when the last contact of a
//!   single-contact interaction lifts.
//! - **Pinch** and **rotate**: evaluated when the last contact of an
//!   interaction that had two contacts lifts.
//! - **Shake**: evaluated on every motion sample, independent of contacts.
//!
//! # Invariants
//!
//! 1. A disabled gesture is never dispatched.
//! 2. Every dispatched gesture invokes the sink exactly once and is recorded
//!    in history exactly once.
//! 3. Timers due at or before an event's timestamp fire before that event is
//!    handled, so results do not depend on how often the host ticks.
//! 4. At most one swipe fires per interaction.
//! 5. A double tap never serves as the first tap of another double tap.
//!
//! # Failure Modes
//!
//! - Events for unknown or surplus contacts are dropped (logged at debug).
//! - A long-press timer that outlives its interaction is a no-op.
//! - Hosts without motion support simply never produce shake.

use tracing::{debug, info};

use crate::config::RecognizerConfig;
use crate::event::{ContactId, InputEvent};
use crate::geometry::{Acceleration, ContactPoint, Millis};
use crate::gesture::{GestureEvent, GestureId};
use crate::history::{FeedbackState, GestureHistory};
use crate::registry::GestureRegistry;
use crate::session::{
    EndOutcome, InteractionSummary, MoveOutcome, StartOutcome, TrackingPhase, TrackingSession,
    gap_ms,
};
use crate::settings::GestureSettings;
use crate::timer::{TimerHandle, TimerQueue};

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Receiver of recognized gestures.
///
/// Called synchronously, once per gesture, at classification time.
pub trait GestureSink {
    fn on_gesture(&mut self, id: GestureId);
}

impl<F: FnMut(GestureId)> GestureSink for F {
    fn on_gesture(&mut self, id: GestureId) {
        self(id);
    }
}

/// Sink that discards notifications; history and the returned events still
/// carry every gesture.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl GestureSink for NoopSink {
    fn on_gesture(&mut self, _id: GestureId) {}
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerTask {
    LongPress { interaction: u64 },
    FeedbackClear,
}

// ---------------------------------------------------------------------------
// GestureRecognizer
// ---------------------------------------------------------------------------

/// Stateful recognizer for one gesture surface.
///
/// Construct exactly one per surface at the application root and hand out
/// `&mut` access; there is no global instance.
pub struct GestureRecognizer<S = NoopSink> {
    config: RecognizerConfig,
    registry: GestureRegistry,
    session: TrackingSession,

    // Double-tap tracking
    last_tap_end: Option<Millis>,

    // Scheduled work
    timers: TimerQueue<TimerTask>,
    long_press_timer: Option<TimerHandle>,
    feedback_timer: Option<TimerHandle>,

    feedback: FeedbackState,
    history: GestureHistory,
    now: Millis,
    sink: S,
}

impl<S> std::fmt::Debug for GestureRecognizer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("phase", &self.session.phase())
            .field("pending_timers", &self.timers.len())
            .field("history_len", &self.history.len())
            .field("feedback_active", &self.feedback.is_active())
            .finish()
    }
}

impl Default for GestureRecognizer<NoopSink> {
    fn default() -> Self {
        Self::new(RecognizerConfig::default(), NoopSink)
    }
}

impl<S: GestureSink> GestureRecognizer<S> {
    /// Create a recognizer with every gesture enabled at default sensitivity.
    #[must_use]
    pub fn new(config: RecognizerConfig, sink: S) -> Self {
        let registry = GestureRegistry::new(&config);
        let history = GestureHistory::new(config.history_capacity);
        Self {
            config,
            registry,
            session: TrackingSession::new(),
            last_tap_end: None,
            timers: TimerQueue::new(),
            long_press_timer: None,
            feedback_timer: None,
            feedback: FeedbackState::default(),
            history,
            now: 0,
            sink,
        }
    }

    /// Create a recognizer and apply stored settings.
    #[must_use]
    pub fn with_settings(config: RecognizerConfig, settings: &GestureSettings, sink: S) -> Self {
        let mut recognizer = Self::new(config, sink);
        recognizer.registry.apply_settings(settings);
        recognizer
    }

    /// Process one normalized event, returning the gestures it produced.
    ///
    /// Timers due at or before the event's timestamp fire first; their
    /// gestures come first in the returned list.
    pub fn process(&mut self, event: &InputEvent) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(2);
        let at = self.advance(event.timestamp(), &mut out);

        match *event {
            InputEvent::ContactStart { id, point } => self.on_contact_start(id, point, at),
            InputEvent::ContactMove { id, point } => self.on_contact_move(id, point),
            InputEvent::ContactEnd { id, point } => self.on_contact_end(id, point, at, &mut out),
            InputEvent::MotionSample { acceleration, .. } => {
                self.on_motion_sample(acceleration, at, &mut out);
            }
        }

        out
    }

    /// Advance the clock to `now`, firing due timers.
    pub fn tick(&mut self, now: Millis) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        self.advance(now, &mut out);
        out
    }

    /// Earliest pending timer deadline, for hosts that schedule a wake-up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Abandon the current interaction without classifying it.
    ///
    /// Pending long-press is cancelled; history, feedback, double-tap memory
    /// and the registry are kept.
    pub fn cancel_interaction(&mut self) {
        self.cancel_long_press();
        self.session.reset_contacts();
    }

    /// Cancel every timer and clear all transient state.
    ///
    /// Call on surface teardown. History and registry are kept so a
    /// remounted surface shows the same log and settings.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.long_press_timer = None;
        self.feedback_timer = None;
        self.feedback = FeedbackState::default();
        self.last_tap_end = None;
        self.session.reset_contacts();
        self.session.shake_mut().reset();
        debug!("recognizer torn down");
    }

    // -- Registry passthrough ----------------------------------------------

    /// Gesture registry.
    #[must_use]
    pub fn registry(&self) -> &GestureRegistry {
        &self.registry
    }

    /// Mutable gesture registry (for the settings screen).
    pub fn registry_mut(&mut self) -> &mut GestureRegistry {
        &mut self.registry
    }

    /// Whether `id` may fire.
    #[must_use]
    pub fn is_enabled(&self, id: GestureId) -> bool {
        self.registry.is_enabled(id)
    }

    /// Sensitivity of `id`.
    #[must_use]
    pub fn sensitivity_of(&self, id: GestureId) -> f32 {
        self.registry.sensitivity_of(id)
    }

    /// Enable or disable `id`.
    pub fn set_enabled(&mut self, id: GestureId, enabled: bool) {
        self.registry.set_enabled(id, enabled);
    }

    /// Set the sensitivity of `id` (clamped to `[0.1, 1.0]`).
    pub fn set_sensitivity(&mut self, id: GestureId, sensitivity: f32) {
        self.registry.set_sensitivity(id, sensitivity);
    }

    /// Apply stored settings.
    pub fn apply_settings(&mut self, settings: &GestureSettings) {
        self.registry.apply_settings(settings);
    }

    // -- Read accessors ----------------------------------------------------

    /// Fired gestures, most recent first.
    #[must_use]
    pub fn history(&self) -> &GestureHistory {
        &self.history
    }

    /// Whether the post-gesture feedback flag is up.
    #[must_use]
    pub fn is_feedback_active(&self) -> bool {
        self.feedback.is_active()
    }

    /// Feedback flag details.
    #[must_use]
    pub fn feedback(&self) -> FeedbackState {
        self.feedback
    }

    /// Live tracking state.
    #[must_use]
    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    /// Current tracking phase.
    #[must_use]
    pub fn phase(&self) -> TrackingPhase {
        self.session.phase()
    }

    /// Latest time seen through `process` or `tick`.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Notification sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable notification sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl<S: GestureSink> GestureRecognizer<S> {
    /// Move the clock forward (never backward) and fire due timers.
    fn advance(&mut self, timestamp: Millis, out: &mut Vec<GestureEvent>) -> Millis {
        self.now = self.now.max(timestamp);
        while let Some((due_at, task)) = self.timers.pop_due(self.now) {
            match task {
                TimerTask::LongPress { interaction } => {
                    self.long_press_timer = None;
                    self.on_long_press_due(interaction, due_at, out);
                }
                TimerTask::FeedbackClear => {
                    self.feedback_timer = None;
                    self.feedback = FeedbackState::default();
                    debug!(at = due_at, "feedback cleared");
                }
            }
        }
        self.now
    }

    fn on_contact_start(&mut self, id: ContactId, point: ContactPoint, at: Millis) {
        match self.session.contact_start(id, point) {
            StartOutcome::Began { interaction } => {
                self.cancel_long_press();
                let due_at = at.saturating_add(self.config.long_press_delay_ms);
                self.long_press_timer = Some(
                    self.timers
                        .schedule(due_at, TimerTask::LongPress { interaction }),
                );
            }
            StartOutcome::BecameMulti => self.cancel_long_press(),
            StartOutcome::Ignored(reason) => {
                debug!(contact = id.0, ?reason, "contact start ignored");
            }
        }
    }

    fn on_contact_move(&mut self, id: ContactId, point: ContactPoint) {
        match self.session.contact_move(id, point) {
            MoveOutcome::Single {
                distance_from_start,
            } => {
                if distance_from_start > self.config.long_press_slop {
                    self.cancel_long_press();
                }
            }
            MoveOutcome::Multi => {}
            MoveOutcome::Ignored(reason) => {
                debug!(contact = id.0, ?reason, "contact move ignored");
            }
        }
    }

    fn on_contact_end(
        &mut self,
        id: ContactId,
        point: ContactPoint,
        at: Millis,
        out: &mut Vec<GestureEvent>,
    ) {
        match self.session.contact_end(id, point) {
            EndOutcome::Ended(summary) => {
                self.cancel_long_press();
                self.classify_interaction(&summary, at, out);
            }
            EndOutcome::BackToSingle => {}
            EndOutcome::Ignored(reason) => {
                debug!(contact = id.0, ?reason, "contact end ignored");
            }
        }
    }

    fn on_motion_sample(
        &mut self,
        acceleration: Acceleration,
        at: Millis,
        out: &mut Vec<GestureEvent>,
    ) {
        let enabled = self.registry.is_enabled(GestureId::Shake);
        let threshold = self.registry.threshold_of(GestureId::Shake);
        let burst = self.config.shake_burst_count;
        if self
            .session
            .shake_mut()
            .sample(acceleration, threshold, burst, enabled)
        {
            self.dispatch(GestureId::Shake, at, out);
        }
    }

    fn on_long_press_due(
        &mut self,
        interaction: u64,
        due_at: Millis,
        out: &mut Vec<GestureEvent>,
    ) {
        let live = self.session.is_tracking()
            && self.session.interaction() == interaction
            && self.session.phase() == TrackingPhase::SingleActive;
        if !live {
            debug!(interaction, "stale long-press timer");
            return;
        }
        if self.registry.is_enabled(GestureId::LongPress) {
            self.dispatch(GestureId::LongPress, due_at, out);
        }
    }

    fn cancel_long_press(&mut self) {
        if let Some(handle) = self.long_press_timer.take() {
            self.timers.cancel(handle);
        }
    }

    fn classify_interaction(
        &mut self,
        summary: &InteractionSummary,
        at: Millis,
        out: &mut Vec<GestureEvent>,
    ) {
        if summary.was_multi {
            if let Some(pinch) = self.pinch_candidate(summary.scale) {
                self.fire_if_enabled(pinch, at, out);
            }
            if summary.rotation.abs() > self.config.rotate_threshold {
                self.fire_if_enabled(GestureId::Rotate, at, out);
            }
            // A multi-contact lift still counts as the previous tap.
            self.last_tap_end = Some(at);
        } else {
            if let Some(swipe) = self.swipe_candidate(summary) {
                self.fire_if_enabled(swipe, at, out);
                // A swipe is never a tap, but its lift is still the previous tap.
                self.last_tap_end = Some(at);
            } else {
                self.classify_tap(at, out);
            }
        }
    }

    /// Horizontal first; a qualifying horizontal swipe blocks the vertical
    /// check even when its direction is disabled.
    fn swipe_candidate(&self, summary: &InteractionSummary) -> Option<GestureId> {
        let delta = summary.delta();
        let velocity = summary.velocity;
        let min_distance = self.config.swipe_min_distance;
        let min_velocity = self.config.swipe_min_velocity;

        if delta.x.abs() > min_distance && velocity.x.abs() > min_velocity {
            Some(if delta.x > 0.0 {
                GestureId::SwipeRight
            } else {
                GestureId::SwipeLeft
            })
        } else if delta.y.abs() > min_distance && velocity.y.abs() > min_velocity {
            Some(if delta.y > 0.0 {
                GestureId::SwipeDown
            } else {
                GestureId::SwipeUp
            })
        } else {
            None
        }
    }

    fn pinch_candidate(&self, scale: f32) -> Option<GestureId> {
        if (scale - 1.0).abs() > self.config.pinch_threshold {
            Some(if scale > 1.0 {
                GestureId::PinchOut
            } else {
                GestureId::PinchIn
            })
        } else {
            None
        }
    }

    fn classify_tap(&mut self, at: Millis, out: &mut Vec<GestureEvent>) {
        let in_window = gap_ms(self.last_tap_end, at).is_some_and(|gap| {
            gap > self.config.double_tap_min_ms && gap < self.config.double_tap_max_ms
        });
        if in_window && self.registry.is_enabled(GestureId::DoubleTap) {
            self.dispatch(GestureId::DoubleTap, at, out);
            // A completed double tap cannot open the next pair.
            self.last_tap_end = None;
        } else {
            self.last_tap_end = Some(at);
        }
    }

    fn fire_if_enabled(&mut self, id: GestureId, at: Millis, out: &mut Vec<GestureEvent>) {
        if self.registry.is_enabled(id) {
            self.dispatch(id, at, out);
        } else {
            debug!(gesture = %id, "suppressed (disabled)");
        }
    }

    fn dispatch(&mut self, id: GestureId, at: Millis, out: &mut Vec<GestureEvent>) {
        info!(gesture = %id, at, "gesture recognized");
        let event = GestureEvent::new(id, at);
        self.sink.on_gesture(id);
        self.history.push(event);

        if let Some(handle) = self.feedback_timer.take() {
            self.timers.cancel(handle);
        }
        let expires_at = at.saturating_add(self.config.feedback_duration_ms);
        self.feedback_timer = Some(self.timers.schedule(expires_at, TimerTask::FeedbackClear));
        self.feedback = FeedbackState {
            active_since: Some(at),
            expires_at: Some(expires_at),
        };

        out.push(event);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recognizer() -> GestureRecognizer {
        GestureRecognizer::default()
    }

    fn ids(events: &[GestureEvent]) -> Vec<GestureId> {
        events.iter().map(|e| e.gesture_id).collect()
    }

    /// Drive a single-contact interaction from `from` to `to`.
    fn drag(
        gr: &mut GestureRecognizer,
        from: (f32, f32, Millis),
        to: (f32, f32, Millis),
    ) -> Vec<GestureId> {
        let mut all = gr.process(&InputEvent::start(1, from.0, from.1, from.2));
        all.extend(gr.process(&InputEvent::moved(1, to.0, to.1, to.2)));
        all.extend(gr.process(&InputEvent::end(1, to.0, to.1, to.2)));
        ids(&all)
    }

    fn tap(gr: &mut GestureRecognizer, down: Millis, up: Millis) -> Vec<GestureId> {
        let mut all = gr.process(&InputEvent::start(1, 50.0, 50.0, down));
        all.extend(gr.process(&InputEvent::end(1, 50.0, 50.0, up)));
        ids(&all)
    }

    /// Two-contact interaction: contacts start 100px apart, contact 2 moves
    /// to `second_end`, then both lift.
    fn two_finger(gr: &mut GestureRecognizer, second_end: (f32, f32)) -> Vec<GestureId> {
        let mut all = gr.process(&InputEvent::start(1, 100.0, 100.0, 0));
        all.extend(gr.process(&InputEvent::start(2, 200.0, 100.0, 10)));
        all.extend(gr.process(&InputEvent::moved(2, second_end.0, second_end.1, 60)));
        all.extend(gr.process(&InputEvent::end(2, second_end.0, second_end.1, 80)));
        all.extend(gr.process(&InputEvent::end(1, 100.0, 100.0, 90)));
        ids(&all)
    }

    fn shake_burst(gr: &mut GestureRecognizer, magnitude: f32, samples: usize) -> Vec<GestureId> {
        let mut all = Vec::new();
        for i in 0..samples {
            let x = if i % 2 == 0 { 0.0 } else { magnitude };
            all.extend(gr.process(&InputEvent::motion(x, 9.8, 0.0, i as Millis * 16)));
        }
        ids(&all)
    }

    // --- Swipe tests ---

    #[test]
    fn swipe_right_scenario() {
        let mut gr = recognizer();
        let fired = drag(&mut gr, (100.0, 100.0, 0), (170.0, 100.0, 150));
        assert_eq!(fired, [GestureId::SwipeRight]);
        assert_eq!(gr.history().len(), 1);
    }

    #[test]
    fn swipe_left() {
        let mut gr = recognizer();
        assert_eq!(
            drag(&mut gr, (200.0, 100.0, 0), (100.0, 100.0, 100)),
            [GestureId::SwipeLeft]
        );
    }

    #[test]
    fn swipe_up_and_down() {
        let mut gr = recognizer();
        assert_eq!(
            drag(&mut gr, (100.0, 300.0, 0), (100.0, 200.0, 100)),
            [GestureId::SwipeUp]
        );
        let mut gr = recognizer();
        assert_eq!(
            drag(&mut gr, (100.0, 100.0, 0), (100.0, 200.0, 100)),
            [GestureId::SwipeDown]
        );
    }

    #[test]
    fn horizontal_wins_over_vertical() {
        let mut gr = recognizer();
        assert_eq!(
            drag(&mut gr, (100.0, 100.0, 0), (200.0, 300.0, 100)),
            [GestureId::SwipeRight]
        );
    }

    #[test]
    fn swipe_soon_after_tap_is_not_a_double_tap() {
        let mut gr = recognizer();
        assert!(tap(&mut gr, 0, 10).is_empty());
        assert_eq!(
            drag(&mut gr, (100.0, 100.0, 20), (200.0, 100.0, 100)),
            [GestureId::SwipeRight]
        );
        // The swipe's lift still pairs with a following tap.
        assert_eq!(tap(&mut gr, 150, 200), [GestureId::DoubleTap]);
    }

    #[test]
    fn disabled_swipe_does_not_become_a_double_tap() {
        let mut gr = recognizer();
        gr.set_enabled(GestureId::SwipeRight, false);
        tap(&mut gr, 0, 10);
        assert!(drag(&mut gr, (100.0, 100.0, 20), (200.0, 100.0, 100)).is_empty());
    }

    #[test]
    fn slow_drag_is_not_a_swipe() {
        let mut gr = recognizer();
        // 70px over 300ms = 0.23 px/ms
        assert!(drag(&mut gr, (100.0, 100.0, 0), (170.0, 100.0, 300)).is_empty());
    }

    #[test]
    fn short_flick_is_not_a_swipe() {
        let mut gr = recognizer();
        // 50px is not > 50px
        assert!(drag(&mut gr, (100.0, 100.0, 0), (150.0, 100.0, 20)).is_empty());
    }

    #[test]
    fn disabled_horizontal_direction_does_not_fall_through_to_vertical() {
        let mut gr = recognizer();
        gr.set_enabled(GestureId::SwipeRight, false);
        assert!(drag(&mut gr, (100.0, 100.0, 0), (200.0, 300.0, 100)).is_empty());
    }

    // --- Double-tap tests ---

    #[test]
    fn double_tap_inside_window() {
        let mut gr = recognizer();
        assert!(tap(&mut gr, 0, 40).is_empty());
        assert_eq!(tap(&mut gr, 100, 190), [GestureId::DoubleTap]);
    }

    #[test]
    fn double_tap_window_is_exclusive() {
        let mut gr = recognizer();
        tap(&mut gr, 0, 40);
        assert!(tap(&mut gr, 60, 90).is_empty(), "50ms gap");

        let mut gr = recognizer();
        tap(&mut gr, 0, 40);
        assert!(tap(&mut gr, 200, 340).is_empty(), "300ms gap");

        let mut gr = recognizer();
        tap(&mut gr, 0, 40);
        assert_eq!(tap(&mut gr, 60, 91), [GestureId::DoubleTap], "51ms gap");

        let mut gr = recognizer();
        tap(&mut gr, 0, 40);
        assert_eq!(tap(&mut gr, 200, 339), [GestureId::DoubleTap], "299ms gap");
    }

    #[test]
    fn triple_tap_yields_one_double_tap() {
        let mut gr = recognizer();
        tap(&mut gr, 0, 20);
        assert_eq!(tap(&mut gr, 100, 120), [GestureId::DoubleTap]);
        assert!(tap(&mut gr, 200, 220).is_empty());
        // ...but the third tap opens a fresh pair.
        assert_eq!(tap(&mut gr, 300, 320), [GestureId::DoubleTap]);
    }

    #[test]
    fn too_close_tap_still_updates_previous_tap() {
        let mut gr = recognizer();
        tap(&mut gr, 0, 10);
        // 30ms gap: too fast, but becomes the new previous tap.
        assert!(tap(&mut gr, 20, 40).is_empty());
        assert_eq!(tap(&mut gr, 100, 140), [GestureId::DoubleTap]);
    }

    // --- Long-press tests ---

    #[test]
    fn long_press_fires_once_at_threshold() {
        let mut gr = recognizer();
        gr.process(&InputEvent::start(1, 50.0, 50.0, 0));
        assert!(gr.tick(499).is_empty());
        let fired = gr.tick(500);
        assert_eq!(ids(&fired), [GestureId::LongPress]);
        assert_eq!(fired[0].fired_at_ms, 500);
        assert!(gr.tick(2000).is_empty());
        assert!(ids(&gr.process(&InputEvent::end(1, 50.0, 50.0, 2100))).is_empty());
        assert_eq!(
            gr.history().iter().filter(|e| e.gesture_id == GestureId::LongPress).count(),
            1
        );
    }

    #[test]
    fn release_at_499_cancels_long_press() {
        let mut gr = recognizer();
        gr.process(&InputEvent::start(1, 50.0, 50.0, 0));
        gr.process(&InputEvent::end(1, 50.0, 50.0, 499));
        assert!(gr.tick(10_000).is_empty());
        assert!(gr.history().is_empty());
    }

    #[test]
    fn long_press_fires_before_late_release_without_tick() {
        let mut gr = recognizer();
        gr.process(&InputEvent::start(1, 50.0, 50.0, 0));
        let fired = gr.process(&InputEvent::end(1, 50.0, 50.0, 650));
        assert_eq!(ids(&fired), [GestureId::LongPress]);
        assert_eq!(fired[0].fired_at_ms, 500);
    }

    #[test]
    fn movement_beyond_slop_cancels_long_press() {
        let mut gr = recognizer();
        gr.process(&InputEvent::start(1, 50.0, 50.0, 0));
        gr.process(&InputEvent::moved(1, 65.0, 50.0, 100));
        assert!(gr.tick(600).is_empty());
        assert_eq!(gr.next_deadline(), None);
    }

    #[test]
    fn jitter_within_slop_keeps_long_press() {
        let mut gr = recognizer();
        gr.process(&InputEvent::start(1, 50.0, 50.0, 0));
        gr.process(&InputEvent::moved(1, 54.0, 47.0, 100));
        assert_eq!(ids(&gr.tick(500)), [GestureId::LongPress]);
    }

    #[test]
    fn second_contact_cancels_long_press() {
        let mut gr = recognizer();
        gr.process(&InputEvent::start(1, 50.0, 50.0, 0));
        gr.process(&InputEvent::start(2, 150.0, 50.0, 100));
        assert!(gr.tick(1000).is_empty());
    }

    // --- Pinch / rotate tests ---

    #[test]
    fn pinch_out_at_1_15() {
        let mut gr = recognizer();
        assert_eq!(two_finger(&mut gr, (215.0, 100.0)), [GestureId::PinchOut]);
    }

    #[test]
    fn pinch_in_at_0_85() {
        let mut gr = recognizer();
        assert_eq!(two_finger(&mut gr, (185.0, 100.0)), [GestureId::PinchIn]);
    }

    #[test]
    fn no_pinch_at_1_05() {
        let mut gr = recognizer();
        assert!(two_finger(&mut gr, (205.0, 100.0)).is_empty());
    }

    #[test]
    fn rotate_fires_past_threshold() {
        let mut gr = recognizer();
        // Rotate the pair by ~0.46 rad while keeping distance ~100.
        let (s, c) = 0.46_f32.sin_cos();
        let fired = two_finger(&mut gr, (100.0 + 100.0 * c, 100.0 + 100.0 * s));
        assert_eq!(fired, [GestureId::Rotate]);
    }

    #[test]
    fn small_rotation_is_ignored() {
        let mut gr = recognizer();
        let (s, c) = 0.2_f32.sin_cos();
        assert!(two_finger(&mut gr, (100.0 + 100.0 * c, 100.0 + 100.0 * s)).is_empty());
    }

    #[test]
    fn pinch_and_rotate_can_both_fire() {
        let mut gr = recognizer();
        let (s, c) = 0.5_f32.sin_cos();
        let fired = two_finger(&mut gr, (100.0 + 130.0 * c, 100.0 + 130.0 * s));
        assert_eq!(fired, [GestureId::PinchOut, GestureId::Rotate]);
    }

    #[test]
    fn two_finger_interaction_never_swipes_or_taps() {
        let mut gr = recognizer();
        tap(&mut gr, 0, 10);
        // Both fingers travel far and fast to the right without changing spread.
        let mut all = gr.process(&InputEvent::start(1, 100.0, 100.0, 100));
        all.extend(gr.process(&InputEvent::start(2, 200.0, 100.0, 100)));
        all.extend(gr.process(&InputEvent::moved(1, 300.0, 100.0, 150)));
        all.extend(gr.process(&InputEvent::moved(2, 400.0, 100.0, 150)));
        all.extend(gr.process(&InputEvent::end(1, 300.0, 100.0, 160)));
        all.extend(gr.process(&InputEvent::end(2, 400.0, 100.0, 170)));
        assert!(all.is_empty(), "{all:?}");
    }

    #[test]
    fn two_finger_end_counts_as_previous_tap() {
        let mut gr = recognizer();
        assert!(two_finger(&mut gr, (200.0, 100.0)).is_empty());
        let ended_at = gr.now();
        assert_eq!(
            tap(&mut gr, ended_at + 50, ended_at + 100),
            [GestureId::DoubleTap]
        );
    }

    // --- Shake tests ---

    #[test]
    fn shake_fires_after_burst() {
        let mut gr = recognizer();
        // Default sensitivity 0.5 -> threshold 7.5
        assert_eq!(shake_burst(&mut gr, 20.0, 5), [GestureId::Shake]);
        assert_eq!(gr.session().shake_sample_count(), 0);
    }

    #[test]
    fn gentle_motion_needs_high_sensitivity() {
        let mut gr = recognizer();
        assert!(shake_burst(&mut gr, 5.0, 9).is_empty());
        gr.set_sensitivity(GestureId::Shake, 0.9);
        // threshold 1.5
        assert_eq!(shake_burst(&mut gr, 5.0, 9), [GestureId::Shake, GestureId::Shake]);
    }

    #[test]
    fn shake_runs_during_contact_tracking() {
        let mut gr = recognizer();
        gr.process(&InputEvent::start(1, 0.0, 0.0, 0));
        assert_eq!(shake_burst(&mut gr, 20.0, 5), [GestureId::Shake]);
        assert_eq!(gr.phase(), TrackingPhase::SingleActive);
    }

    // --- Registry tests ---

    #[test]
    fn disabled_gestures_are_silent() {
        let cases: [(GestureId, fn(&mut GestureRecognizer) -> Vec<GestureId>); 4] = [
            (GestureId::SwipeRight, |gr| {
                drag(gr, (100.0, 100.0, 0), (170.0, 100.0, 150))
            }),
            (GestureId::PinchOut, |gr| two_finger(gr, (230.0, 100.0))),
            (GestureId::Shake, |gr| shake_burst(gr, 30.0, 12)),
            (GestureId::LongPress, |gr| {
                gr.process(&InputEvent::start(1, 0.0, 0.0, 0));
                ids(&gr.tick(5000))
            }),
        ];
        for (id, drive) in cases {
            let mut enabled = recognizer();
            assert!(drive(&mut enabled).contains(&id), "{id} should fire when enabled");

            let mut disabled = recognizer();
            disabled.set_enabled(id, false);
            assert!(!drive(&mut disabled).contains(&id), "{id} fired while disabled");
            assert!(disabled.history().iter().all(|e| e.gesture_id != id));
        }
    }

    #[test]
    fn disabled_double_tap_still_tracks_taps() {
        let mut gr = recognizer();
        gr.set_enabled(GestureId::DoubleTap, false);
        tap(&mut gr, 0, 10);
        assert!(tap(&mut gr, 100, 110).is_empty());
        gr.set_enabled(GestureId::DoubleTap, true);
        assert_eq!(tap(&mut gr, 200, 210), [GestureId::DoubleTap]);
    }

    #[test]
    fn settings_are_applied_at_construction() {
        use crate::settings::GestureSetting;
        let settings = GestureSettings::new().with(
            GestureId::LongPress,
            GestureSetting {
                enabled: false,
                sensitivity: 0.5,
            },
        );
        let mut gr =
            GestureRecognizer::with_settings(RecognizerConfig::default(), &settings, NoopSink);
        gr.process(&InputEvent::start(1, 0.0, 0.0, 0));
        assert!(gr.tick(1000).is_empty());
    }

    // --- Dispatch / history / feedback tests ---

    #[test]
    fn sink_is_called_once_per_gesture() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let mut gr = GestureRecognizer::new(RecognizerConfig::default(), move |id: GestureId| {
            log.borrow_mut().push(id);
        });
        gr.process(&InputEvent::start(1, 100.0, 100.0, 0));
        gr.process(&InputEvent::moved(1, 170.0, 100.0, 150));
        gr.process(&InputEvent::end(1, 170.0, 100.0, 150));
        assert_eq!(*seen.borrow(), [GestureId::SwipeRight]);
    }

    #[test]
    fn history_is_capped_and_newest_first() {
        let mut gr = recognizer();
        let mut t = 0;
        for _ in 0..11 {
            gr.process(&InputEvent::start(1, 100.0, 100.0, t));
            gr.process(&InputEvent::moved(1, 200.0, 100.0, t + 100));
            gr.process(&InputEvent::end(1, 200.0, 100.0, t + 100));
            t += 1000;
        }
        assert_eq!(gr.history().len(), 10);
        let times: Vec<_> = gr.history().iter().map(|e| e.fired_at_ms).collect();
        assert_eq!(times[0], 10_100);
        assert_eq!(times[9], 1_100);
    }

    #[test]
    fn feedback_expires_after_duration() {
        let mut gr = recognizer();
        drag(&mut gr, (100.0, 100.0, 0), (170.0, 100.0, 150));
        assert!(gr.is_feedback_active());
        assert_eq!(gr.feedback().expires_at, Some(2150));
        gr.tick(2149);
        assert!(gr.is_feedback_active());
        gr.tick(2150);
        assert!(!gr.is_feedback_active());
    }

    #[test]
    fn new_gesture_restarts_feedback_window() {
        let mut gr = recognizer();
        drag(&mut gr, (100.0, 100.0, 0), (170.0, 100.0, 150));
        drag(&mut gr, (100.0, 100.0, 1500), (170.0, 100.0, 1650));
        gr.tick(2500);
        assert!(gr.is_feedback_active(), "first clear must have been replaced");
        assert_eq!(gr.next_deadline(), Some(3650));
        gr.tick(3650);
        assert!(!gr.is_feedback_active());
    }

    // --- Lifecycle tests ---

    #[test]
    fn teardown_cancels_everything() {
        let mut gr = recognizer();
        drag(&mut gr, (100.0, 100.0, 0), (170.0, 100.0, 150));
        gr.process(&InputEvent::start(1, 0.0, 0.0, 200));
        gr.teardown();
        assert_eq!(gr.next_deadline(), None);
        assert!(!gr.is_feedback_active());
        assert_eq!(gr.phase(), TrackingPhase::Idle);
        assert!(gr.tick(10_000).is_empty());
        assert_eq!(gr.history().len(), 1);
    }

    #[test]
    fn cancel_interaction_skips_classification() {
        let mut gr = recognizer();
        gr.process(&InputEvent::start(1, 100.0, 100.0, 0));
        gr.process(&InputEvent::moved(1, 170.0, 100.0, 150));
        gr.cancel_interaction();
        assert!(gr.process(&InputEvent::end(1, 170.0, 100.0, 150)).is_empty());
        assert!(gr.tick(1000).is_empty());
    }

    #[test]
    fn clock_never_runs_backward() {
        let mut gr = recognizer();
        gr.tick(1000);
        gr.process(&InputEvent::start(1, 0.0, 0.0, 10));
        assert_eq!(gr.now(), 1000);
        // Long press is scheduled from the clamped clock.
        assert_eq!(gr.next_deadline(), Some(1500));
    }

    #[test]
    fn debug_format() {
        let gr = recognizer();
        let dbg = format!("{gr:?}");
        assert!(dbg.contains("GestureRecognizer"));
        assert!(dbg.contains("Idle"));
    }
}
