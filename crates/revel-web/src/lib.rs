#![forbid(unsafe_code)]

//! Browser integration for Revel gesture recognition.
//!
//! `revel-web` sits between the DOM and [`revel_core`]:
//!
//! - [`host_event`]: the pointer, touch, and device-motion events a surface listens to.
//! - [`adapter`]: translation into normalized [`revel_core::InputEvent`]s, default
//!   suppression, touch/pointer family locking, and timestamp normalization.
//! - [`mount`]: [`GestureSurface`] plus the [`SurfaceMount`] guard that owns
//!   listener registration for as long as the surface is mounted.
//! - `input_parser` (feature `input-parser`): JSON decoding for JS bridges.
//!
//! # Example
//!
//! ```
//! use revel_web::host_event::{HostEvent, HostEventKind, HostPointer};
//! use revel_web::mount::{GestureSurface, HostCapabilities, ListenerHost};
//! use revel_core::GestureId;
//!
//! #[derive(Default)]
//! struct Dom(Vec<HostEventKind>);
//!
//! impl ListenerHost for Dom {
//!     fn capabilities(&self) -> HostCapabilities {
//!         HostCapabilities::default()
//!     }
//!     fn add_listener(&mut self, kind: HostEventKind) {
//!         self.0.push(kind);
//!     }
//!     fn remove_listener(&mut self, kind: HostEventKind) {
//!         self.0.retain(|&k| k != kind);
//!     }
//! }
//!
//! let mut dom = Dom::default();
//! let mut surface = GestureSurface::default();
//! {
//!     let mut mount = surface.mount(&mut dom);
//!     mount.handle(&HostEvent::PointerDown(HostPointer::new(1, 100.0, 100.0, 1.0)));
//!     mount.handle(&HostEvent::PointerMove(HostPointer::new(1, 170.0, 100.0, 151.0)));
//!     let up = HostEvent::PointerUp(HostPointer::new(1, 170.0, 100.0, 151.0));
//!     let response = mount.handle(&up);
//!     assert!(response.prevent_default);
//!     assert_eq!(response.gestures[0].gesture_id, GestureId::SwipeRight);
//! }
//! assert!(dom.0.is_empty());
//! ```

pub mod adapter;
pub mod host_event;
#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod mount;

pub use adapter::{
    AdapterConfig, AdapterDispatch, AdapterIgnoredReason, InputAdapter, InputFamily,
};
pub use host_event::{HostEvent, HostEventKind};
#[cfg(feature = "input-parser")]
pub use input_parser::{HostEventParseError, parse_host_event, parse_host_events};
pub use mount::{GestureSurface, HostCapabilities, HostResponse, ListenerHost, SurfaceMount};
