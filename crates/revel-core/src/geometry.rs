#![forbid(unsafe_code)]

//! Geometric primitives for contact tracking.
//!
//! Coordinates are surface-local CSS pixels (origin at top-left, `y` grows
//! downward). Timestamps are monotonic milliseconds supplied by the host.

use std::f32::consts::PI;

/// Monotonic timestamp in milliseconds.
pub type Millis = u64;

/// A 2D vector in surface pixels (or pixels per millisecond for velocities).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector in radians, measured from the positive x axis.
    #[inline]
    #[must_use]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Component-wise division by a scalar. Returns zero when `divisor` is zero.
    #[inline]
    #[must_use]
    pub fn per(self, divisor: f32) -> Self {
        if divisor == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / divisor, self.y / divisor)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// One physical touch/pointer sample.
///
/// Immutable once created; every move produces a new point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    pub x: f32,
    pub y: f32,
    pub timestamp: Millis,
}

impl ContactPoint {
    /// Create a new contact sample.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, timestamp: Millis) -> Self {
        Self { x, y, timestamp }
    }

    /// Position as a vector.
    #[inline]
    #[must_use]
    pub const fn position(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Displacement from `origin` to `self`.
    #[inline]
    #[must_use]
    pub fn displacement_from(self, origin: Self) -> Vec2 {
        self.position() - origin.position()
    }

    /// Milliseconds elapsed since `earlier` (saturating at zero).
    #[inline]
    #[must_use]
    pub const fn elapsed_since(self, earlier: Self) -> Millis {
        self.timestamp.saturating_sub(earlier.timestamp)
    }
}

/// Device acceleration sample (m/s², including gravity).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Acceleration {
    /// Create a new acceleration vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Largest per-axis absolute difference to `previous`.
    #[must_use]
    pub fn max_axis_delta(self, previous: Self) -> f32 {
        let dx = (self.x - previous.x).abs();
        let dy = (self.y - previous.y).abs();
        let dz = (self.z - previous.z).abs();
        dx.max(dy).max(dz)
    }
}

/// Wrap an angle into `(-π, π]`.
#[must_use]
pub fn normalize_angle(mut radians: f32) -> f32 {
    if !radians.is_finite() {
        return 0.0;
    }
    while radians > PI {
        radians -= 2.0 * PI;
    }
    while radians <= -PI {
        radians += 2.0 * PI;
    }
    radians
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_angle() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert!((Vec2::new(0.0, 1.0).angle() - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn per_zero_is_zero() {
        assert_eq!(Vec2::new(10.0, -4.0).per(0.0), Vec2::ZERO);
        assert_eq!(Vec2::new(10.0, -4.0).per(2.0), Vec2::new(5.0, -2.0));
    }

    #[test]
    fn displacement_and_elapsed() {
        let a = ContactPoint::new(100.0, 100.0, 0);
        let b = ContactPoint::new(170.0, 90.0, 150);
        assert_eq!(b.displacement_from(a), Vec2::new(70.0, -10.0));
        assert_eq!(b.elapsed_since(a), 150);
        assert_eq!(a.elapsed_since(b), 0);
    }

    #[test]
    fn max_axis_delta_picks_largest() {
        let prev = Acceleration::new(0.0, 9.8, 0.0);
        let next = Acceleration::new(-4.0, 9.0, 12.5);
        assert_eq!(next.max_axis_delta(prev), 12.5);
    }

    #[test]
    fn normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert_eq!(normalize_angle(PI), PI);
        assert_eq!(normalize_angle(f32::NAN), 0.0);
    }
}
