#![forbid(unsafe_code)]

//! Shake detection from device-motion samples.
//!
//! Runs independently of contact tracking. Each sample is compared to the
//! previous one; if any axis moved by more than the current threshold the
//! sample counts toward a burst. Once the count exceeds the burst size the
//! detector fires and starts over.

use crate::geometry::Acceleration;

/// Rolling shake detector.
#[derive(Debug, Clone, Default)]
pub struct ShakeDetector {
    last: Option<Acceleration>,
    sample_count: u32,
}

impl ShakeDetector {
    /// Create a detector with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: None,
            sample_count: 0,
        }
    }

    /// Feed one sample.
    ///
    /// `threshold` is the per-axis delta a sample must exceed; `burst` is the
    /// count that must be exceeded to fire. Returns `true` when a shake fires.
    /// When `enabled` is false the last vector is still tracked but nothing is
    /// counted.
    pub fn sample(
        &mut self,
        acceleration: Acceleration,
        threshold: f32,
        burst: u32,
        enabled: bool,
    ) -> bool {
        let previous = self.last.replace(acceleration);
        if !enabled {
            self.sample_count = 0;
            return false;
        }
        let Some(previous) = previous else {
            return false;
        };
        if acceleration.max_axis_delta(previous) > threshold {
            self.sample_count += 1;
        }
        if self.sample_count > burst {
            self.sample_count = 0;
            return true;
        }
        false
    }

    /// Qualifying samples counted toward the current burst.
    #[inline]
    #[must_use]
    pub const fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Forget the last vector and the running count.
    pub fn reset(&mut self) {
        self.last = None;
        self.sample_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jolt(i: usize) -> Acceleration {
        // Alternates between rest and a 20 m/s² spike on x.
        if i % 2 == 0 {
            Acceleration::new(0.0, 9.8, 0.0)
        } else {
            Acceleration::new(20.0, 9.8, 0.0)
        }
    }

    #[test]
    fn first_sample_only_primes() {
        let mut d = ShakeDetector::new();
        assert!(!d.sample(Acceleration::new(50.0, 0.0, 0.0), 0.0, 3, true));
        assert_eq!(d.sample_count(), 0);
    }

    #[test]
    fn fires_on_fourth_qualifying_sample() {
        let mut d = ShakeDetector::new();
        let fired: Vec<bool> = (0..6).map(|i| d.sample(jolt(i), 7.5, 3, true)).collect();
        // Sample 0 primes; samples 1..=4 qualify; the 4th qualifying one fires.
        assert_eq!(fired, [false, false, false, false, true, false]);
        assert_eq!(d.sample_count(), 1);
    }

    #[test]
    fn small_deltas_do_not_count() {
        let mut d = ShakeDetector::new();
        for i in 0..20 {
            let a = Acceleration::new(if i % 2 == 0 { 0.0 } else { 5.0 }, 9.8, 0.0);
            assert!(!d.sample(a, 7.5, 3, true));
        }
        assert_eq!(d.sample_count(), 0);
    }

    #[test]
    fn delta_equal_to_threshold_does_not_count() {
        let mut d = ShakeDetector::new();
        d.sample(Acceleration::new(0.0, 0.0, 0.0), 5.0, 3, true);
        d.sample(Acceleration::new(5.0, 0.0, 0.0), 5.0, 3, true);
        assert_eq!(d.sample_count(), 0);
    }

    #[test]
    fn disabled_never_fires_and_holds_count_at_zero() {
        let mut d = ShakeDetector::new();
        for i in 0..10 {
            assert!(!d.sample(jolt(i), 0.0, 3, false));
        }
        assert_eq!(d.sample_count(), 0);
        // Re-enabling compares against the vector seen while disabled.
        assert!(!d.sample(jolt(10), 7.5, 3, true));
        assert_eq!(d.sample_count(), 1);
    }

    #[test]
    fn reset_forgets_previous_vector() {
        let mut d = ShakeDetector::new();
        d.sample(jolt(0), 7.5, 3, true);
        d.sample(jolt(1), 7.5, 3, true);
        d.reset();
        assert_eq!(d.sample_count(), 0);
        assert!(!d.sample(jolt(2), 7.5, 3, true));
        assert_eq!(d.sample_count(), 0);
    }
}
