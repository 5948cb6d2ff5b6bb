#![forbid(unsafe_code)]

//! Normalized input events.
//!
//! The host adapter translates native pointer, touch and motion notifications
//! into this four-kind vocabulary. The recognizer never sees host types.

use crate::geometry::{Acceleration, ContactPoint, Millis};

/// Host-assigned identifier of one physical contact (pointer id or touch identifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u32);

/// A normalized input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A contact touched the surface.
    ContactStart { id: ContactId, point: ContactPoint },
    /// A tracked contact moved.
    ContactMove { id: ContactId, point: ContactPoint },
    /// A contact left the surface (lifted or cancelled by the host).
    ContactEnd { id: ContactId, point: ContactPoint },
    /// One device-motion reading.
    MotionSample {
        acceleration: Acceleration,
        timestamp: Millis,
    },
}

impl InputEvent {
    /// Timestamp carried by the event.
    #[must_use]
    pub const fn timestamp(&self) -> Millis {
        match self {
            Self::ContactStart { point, .. }
            | Self::ContactMove { point, .. }
            | Self::ContactEnd { point, .. } => point.timestamp,
            Self::MotionSample { timestamp, .. } => *timestamp,
        }
    }

    /// Contact start helper.
    #[must_use]
    pub const fn start(id: u32, x: f32, y: f32, timestamp: Millis) -> Self {
        Self::ContactStart {
            id: ContactId(id),
            point: ContactPoint::new(x, y, timestamp),
        }
    }

    /// Contact move helper.
    #[must_use]
    pub const fn moved(id: u32, x: f32, y: f32, timestamp: Millis) -> Self {
        Self::ContactMove {
            id: ContactId(id),
            point: ContactPoint::new(x, y, timestamp),
        }
    }

    /// Contact end helper.
    #[must_use]
    pub const fn end(id: u32, x: f32, y: f32, timestamp: Millis) -> Self {
        Self::ContactEnd {
            id: ContactId(id),
            point: ContactPoint::new(x, y, timestamp),
        }
    }

    /// Motion sample helper.
    #[must_use]
    pub const fn motion(x: f32, y: f32, z: f32, timestamp: Millis) -> Self {
        Self::MotionSample {
            acceleration: Acceleration::new(x, y, z),
            timestamp,
        }
    }
}
