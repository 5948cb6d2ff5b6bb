#![forbid(unsafe_code)]

//! Recognizer thresholds and timeouts.

use crate::geometry::Millis;

/// Timing and geometry constants used by the recognizer.
///
/// Defaults match the tuned values for phone-sized touch surfaces. Only the
/// shake threshold is scaled by per-gesture sensitivity; every other value
/// here is used as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerConfig {
    /// Delay before a stationary single contact fires long-press (default: 500ms).
    pub long_press_delay_ms: Millis,
    /// Movement from the start point that cancels a pending long-press (default: 10px).
    pub long_press_slop: f32,
    /// Minimum displacement along the swipe axis (default: 50px).
    pub swipe_min_distance: f32,
    /// Minimum velocity along the swipe axis (default: 0.3 px/ms).
    pub swipe_min_velocity: f32,
    /// Lower bound of the double-tap window, exclusive (default: 50ms).
    pub double_tap_min_ms: Millis,
    /// Upper bound of the double-tap window, exclusive (default: 300ms).
    pub double_tap_max_ms: Millis,
    /// Minimum `|scale - 1|` for a pinch (default: 0.1).
    pub pinch_threshold: f32,
    /// Minimum `|rotation|` in radians for a rotate (default: 0.3).
    pub rotate_threshold: f32,
    /// Per-axis acceleration delta at sensitivity 0 (default: 15 m/s²).
    pub shake_base_threshold: f32,
    /// Qualifying samples that must be exceeded before shake fires (default: 3).
    pub shake_burst_count: u32,
    /// Gesture history capacity (default: 10).
    pub history_capacity: usize,
    /// How long the feedback flag stays up after a gesture (default: 2000ms).
    pub feedback_duration_ms: Millis,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            long_press_delay_ms: 500,
            long_press_slop: 10.0,
            swipe_min_distance: 50.0,
            swipe_min_velocity: 0.3,
            double_tap_min_ms: 50,
            double_tap_max_ms: 300,
            pinch_threshold: 0.1,
            rotate_threshold: 0.3,
            shake_base_threshold: 15.0,
            shake_burst_count: 3,
            history_capacity: 10,
            feedback_duration_ms: 2000,
        }
    }
}

impl RecognizerConfig {
    /// Check the configuration for values the recognizer cannot work with.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.double_tap_min_ms >= self.double_tap_max_ms {
            errors.push(format!(
                "double_tap window is empty: ({}, {})",
                self.double_tap_min_ms, self.double_tap_max_ms
            ));
        }
        for (name, value) in [
            ("long_press_slop", self.long_press_slop),
            ("swipe_min_distance", self.swipe_min_distance),
            ("swipe_min_velocity", self.swipe_min_velocity),
            ("pinch_threshold", self.pinch_threshold),
            ("rotate_threshold", self.rotate_threshold),
            ("shake_base_threshold", self.shake_base_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if self.history_capacity == 0 {
            errors.push("history_capacity must be > 0".into());
        }

        errors
    }
}
