#![forbid(unsafe_code)]

//! Browser-side event vocabulary.
//!
//! These types mirror the DOM events the gesture surface listens to, reduced
//! to the fields the adapter needs. Coordinates are client coordinates;
//! timestamps are `Event.timeStamp` milliseconds.

/// One changed touch of a DOM `TouchEvent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostTouch {
    pub identifier: u32,
    pub x: f32,
    pub y: f32,
}

impl HostTouch {
    /// Create a touch record.
    #[must_use]
    pub const fn new(identifier: u32, x: f32, y: f32) -> Self {
        Self { identifier, x, y }
    }
}

/// `DeviceMotionEvent.accelerationIncludingGravity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostAcceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HostAcceleration {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Pointer payload shared by the `pointer*` events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostPointer {
    pub pointer_id: u32,
    pub x: f32,
    pub y: f32,
    pub time_stamp: f64,
}

impl HostPointer {
    /// Create a pointer payload.
    #[must_use]
    pub const fn new(pointer_id: u32, x: f32, y: f32, time_stamp: f64) -> Self {
        Self {
            pointer_id,
            x,
            y,
            time_stamp,
        }
    }
}

/// Touch payload shared by the `touch*` events.
#[derive(Debug, Clone, PartialEq)]
pub struct HostTouchList {
    pub changed_touches: Vec<HostTouch>,
    pub time_stamp: f64,
}

/// Motion payload of `devicemotion`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostMotion {
    /// `None` when the device has no accelerometer (the field is `null` in the DOM).
    pub acceleration: Option<HostAcceleration>,
    pub time_stamp: f64,
}

/// A DOM event delivered to the gesture surface.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    PointerDown(HostPointer),
    PointerMove(HostPointer),
    PointerUp(HostPointer),
    PointerCancel(HostPointer),
    TouchStart(HostTouchList),
    TouchMove(HostTouchList),
    TouchEnd(HostTouchList),
    TouchCancel(HostTouchList),
    DeviceMotion(HostMotion),
}

impl HostEvent {
    /// Listener kind this event is delivered through.
    #[must_use]
    pub const fn kind(&self) -> HostEventKind {
        match self {
            Self::PointerDown(_) => HostEventKind::PointerDown,
            Self::PointerMove(_) => HostEventKind::PointerMove,
            Self::PointerUp(_) => HostEventKind::PointerUp,
            Self::PointerCancel(_) => HostEventKind::PointerCancel,
            Self::TouchStart(_) => HostEventKind::TouchStart,
            Self::TouchMove(_) => HostEventKind::TouchMove,
            Self::TouchEnd(_) => HostEventKind::TouchEnd,
            Self::TouchCancel(_) => HostEventKind::TouchCancel,
            Self::DeviceMotion(_) => HostEventKind::DeviceMotion,
        }
    }

    /// `Event.timeStamp` of the event.
    #[must_use]
    pub const fn time_stamp(&self) -> f64 {
        match self {
            Self::PointerDown(p)
            | Self::PointerMove(p)
            | Self::PointerUp(p)
            | Self::PointerCancel(p) => p.time_stamp,
            Self::TouchStart(t) | Self::TouchMove(t) | Self::TouchEnd(t) | Self::TouchCancel(t) => {
                t.time_stamp
            }
            Self::DeviceMotion(m) => m.time_stamp,
        }
    }

    /// Touch start helper.
    #[must_use]
    pub fn touch_start(touches: &[HostTouch], time_stamp: f64) -> Self {
        Self::TouchStart(HostTouchList {
            changed_touches: touches.to_vec(),
            time_stamp,
        })
    }

    /// Touch move helper.
    #[must_use]
    pub fn touch_move(touches: &[HostTouch], time_stamp: f64) -> Self {
        Self::TouchMove(HostTouchList {
            changed_touches: touches.to_vec(),
            time_stamp,
        })
    }

    /// Touch end helper.
    #[must_use]
    pub fn touch_end(touches: &[HostTouch], time_stamp: f64) -> Self {
        Self::TouchEnd(HostTouchList {
            changed_touches: touches.to_vec(),
            time_stamp,
        })
    }

    /// Device motion helper.
    #[must_use]
    pub const fn motion(acceleration: Option<HostAcceleration>, time_stamp: f64) -> Self {
        Self::DeviceMotion(HostMotion {
            acceleration,
            time_stamp,
        })
    }
}

/// DOM listener kinds registered by a mounted surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    DeviceMotion,
}

impl HostEventKind {
    /// Listeners attached to the surface element.
    pub const SURFACE: [Self; 8] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::PointerCancel,
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
        Self::TouchCancel,
    ];

    /// DOM event name, as passed to `addEventListener`.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerCancel => "pointercancel",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::DeviceMotion => "devicemotion",
        }
    }

    /// Whether the listener lives on `window` rather than the surface element.
    #[must_use]
    pub const fn is_window_level(self) -> bool {
        matches!(self, Self::DeviceMotion)
    }
}
