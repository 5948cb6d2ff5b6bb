#![forbid(unsafe_code)]

//! Gesture vocabulary shared with collaborators.
//!
//! [`GestureId`] strings are stable: sound, navigation and settings storage
//! all key on them, so renaming a variant's string is a breaking change.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::geometry::Millis;

// ---------------------------------------------------------------------------
// GestureId
// ---------------------------------------------------------------------------

/// Every gesture the recognizer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GestureId {
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    PinchIn,
    PinchOut,
    Rotate,
    Shake,
    DoubleTap,
    LongPress,
}

impl GestureId {
    /// All gestures, in registry order.
    pub const ALL: [Self; 10] = [
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::SwipeUp,
        Self::SwipeDown,
        Self::PinchIn,
        Self::PinchOut,
        Self::Rotate,
        Self::Shake,
        Self::DoubleTap,
        Self::LongPress,
    ];

    /// Stable string id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SwipeLeft => "swipe-left",
            Self::SwipeRight => "swipe-right",
            Self::SwipeUp => "swipe-up",
            Self::SwipeDown => "swipe-down",
            Self::PinchIn => "pinch-in",
            Self::PinchOut => "pinch-out",
            Self::Rotate => "rotate",
            Self::Shake => "shake",
            Self::DoubleTap => "double-tap",
            Self::LongPress => "long-press",
        }
    }

    /// Position in [`GestureId::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask for this gesture.
    #[must_use]
    pub const fn mask(self) -> GestureMask {
        GestureMask::from_bits_truncate(1u16 << (self as u16))
    }

    /// True for the four swipe directions.
    #[must_use]
    pub const fn is_swipe(self) -> bool {
        matches!(
            self,
            Self::SwipeLeft | Self::SwipeRight | Self::SwipeUp | Self::SwipeDown
        )
    }
}

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not part of the gesture vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGesture(pub String);

impl fmt::Display for UnknownGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gesture id: {:?}", self.0)
    }
}

impl std::error::Error for UnknownGesture {}

impl FromStr for GestureId {
    type Err = UnknownGesture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownGesture(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// GestureMask
// ---------------------------------------------------------------------------

bitflags! {
    /// A set of gestures, one bit per [`GestureId`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GestureMask: u16 {
        const SWIPE_LEFT  = 1 << 0;
        const SWIPE_RIGHT = 1 << 1;
        const SWIPE_UP    = 1 << 2;
        const SWIPE_DOWN  = 1 << 3;
        const PINCH_IN    = 1 << 4;
        const PINCH_OUT   = 1 << 5;
        const ROTATE      = 1 << 6;
        const SHAKE       = 1 << 7;
        const DOUBLE_TAP  = 1 << 8;
        const LONG_PRESS  = 1 << 9;

        const SWIPES = Self::SWIPE_LEFT.bits()
            | Self::SWIPE_RIGHT.bits()
            | Self::SWIPE_UP.bits()
            | Self::SWIPE_DOWN.bits();
    }
}

impl GestureMask {
    /// Iterate the gesture ids contained in this mask, in registry order.
    pub fn ids(self) -> impl Iterator<Item = GestureId> {
        GestureId::ALL
            .into_iter()
            .filter(move |id| self.contains(id.mask()))
    }
}

impl From<GestureId> for GestureMask {
    fn from(id: GestureId) -> Self {
        id.mask()
    }
}

// ---------------------------------------------------------------------------
// GestureEvent
// ---------------------------------------------------------------------------

/// One recognized gesture, as recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub gesture_id: GestureId,
    pub fired_at_ms: Millis,
}

impl GestureEvent {
    /// Create a gesture event.
    #[must_use]
    pub const fn new(gesture_id: GestureId, fired_at_ms: Millis) -> Self {
        Self {
            gesture_id,
            fired_at_ms,
        }
    }
}
