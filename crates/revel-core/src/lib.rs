#![forbid(unsafe_code)]

//! Core: touch gesture recognition for the Revel party game.
//!
//! # Role in Revel
//! `revel-core` turns normalized contact and motion events into semantic
//! gestures (swipe, pinch, rotate, double tap, long press, shake). It has no
//! knowledge of the browser; `revel-web` adapts host events into
//! [`event::InputEvent`] values and owns listener lifetime.
//!
//! # Primary responsibilities
//! - **GestureRecognizer**: the tracking state machine, classification, and dispatch.
//! - **GestureRegistry**: which gestures are enabled and how sensitive they are.
//! - **GestureHistory**: bounded, most-recent-first log for display.
//! - **TimerQueue**: cancellable long-press and feedback timers on a host-driven clock.
//! - **GestureSettings**: per-gesture settings exchanged with persistence.
//!
//! # Example
//!
//! ```
//! use revel_core::event::InputEvent;
//! use revel_core::gesture::GestureId;
//! use revel_core::recognizer::GestureRecognizer;
//!
//! let mut recognizer = GestureRecognizer::default();
//! recognizer.process(&InputEvent::start(1, 100.0, 100.0, 0));
//! recognizer.process(&InputEvent::moved(1, 170.0, 100.0, 150));
//! let fired = recognizer.process(&InputEvent::end(1, 170.0, 100.0, 150));
//!
//! assert_eq!(fired[0].gesture_id, GestureId::SwipeRight);
//! assert_eq!(recognizer.history().len(), 1);
//! ```

pub mod config;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod recognizer;
pub mod registry;
pub mod session;
pub mod settings;
pub mod shake;
pub mod timer;

#[cfg(feature = "tracing-json")]
pub mod logging;

pub use config::RecognizerConfig;
pub use event::{ContactId, InputEvent};
pub use gesture::{GestureEvent, GestureId, GestureMask};
pub use recognizer::{GestureRecognizer, GestureSink, NoopSink};
pub use registry::GestureRegistry;
pub use settings::{GestureSetting, GestureSettings, SettingsError};
