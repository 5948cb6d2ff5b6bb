#![forbid(unsafe_code)]

//! Listener lifetime for a gesture surface.
//!
//! [`GestureSurface::mount`] registers the DOM listener set through a
//! [`ListenerHost`] and returns a [`SurfaceMount`] guard. Dropping the guard
//! unregisters every listener it registered (in reverse order), deactivates
//! the adapter, and tears down the recognizer's pending timers. The guard
//! borrows the host and the surface, so neither can be touched elsewhere while
//! it is alive.

use revel_core::config::RecognizerConfig;
use revel_core::geometry::Millis;
use revel_core::gesture::GestureEvent;
use revel_core::recognizer::{GestureRecognizer, GestureSink, NoopSink};
use tracing::{debug, info};

use crate::adapter::{AdapterConfig, AdapterDispatch, InputAdapter};
use crate::host_event::{HostEvent, HostEventKind};

/// What the host environment can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostCapabilities {
    /// `devicemotion` is available (and permitted).
    pub motion: bool,
}

/// Host-side listener registration.
///
/// Implemented by the JS bridge; each call corresponds to one
/// `addEventListener` / `removeEventListener`.
pub trait ListenerHost {
    fn capabilities(&self) -> HostCapabilities;
    fn add_listener(&mut self, kind: HostEventKind);
    fn remove_listener(&mut self, kind: HostEventKind);
}

/// Answer to one delivered host event.
#[derive(Debug, Clone, PartialEq)]
pub struct HostResponse {
    /// The host must call `preventDefault()` on the event.
    pub prevent_default: bool,
    /// Gestures fired while handling the event.
    pub gestures: Vec<GestureEvent>,
}

/// Adapter and recognizer for one gesture surface.
#[derive(Debug)]
pub struct GestureSurface<S = NoopSink> {
    adapter: InputAdapter,
    recognizer: GestureRecognizer<S>,
}

impl Default for GestureSurface<NoopSink> {
    fn default() -> Self {
        Self::new(RecognizerConfig::default(), AdapterConfig::default(), NoopSink)
    }
}

impl<S: GestureSink> GestureSurface<S> {
    #[must_use]
    pub fn new(config: RecognizerConfig, adapter: AdapterConfig, sink: S) -> Self {
        Self::from_parts(InputAdapter::new(adapter), GestureRecognizer::new(config, sink))
    }

    /// Assemble from an existing adapter and recognizer.
    #[must_use]
    pub fn from_parts(mut adapter: InputAdapter, recognizer: GestureRecognizer<S>) -> Self {
        adapter.deactivate();
        Self {
            adapter,
            recognizer,
        }
    }

    /// Register listeners on `host` and start accepting events.
    pub fn mount<'a, H: ListenerHost>(&'a mut self, host: &'a mut H) -> SurfaceMount<'a, H, S> {
        let capabilities = host.capabilities();
        let mut registered = Vec::with_capacity(HostEventKind::SURFACE.len() + 1);
        for kind in HostEventKind::SURFACE {
            host.add_listener(kind);
            registered.push(kind);
        }
        if capabilities.motion {
            host.add_listener(HostEventKind::DeviceMotion);
            registered.push(HostEventKind::DeviceMotion);
        } else {
            debug!("motion capability absent, shake disabled for this mount");
        }
        self.adapter.activate();
        info!(listeners = registered.len(), "gesture surface mounted");
        SurfaceMount {
            surface: self,
            host,
            registered,
        }
    }

    #[must_use]
    pub fn adapter(&self) -> &InputAdapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut InputAdapter {
        &mut self.adapter
    }

    #[must_use]
    pub fn recognizer(&self) -> &GestureRecognizer<S> {
        &self.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut GestureRecognizer<S> {
        &mut self.recognizer
    }

    /// Take the recognizer back out.
    #[must_use]
    pub fn into_recognizer(self) -> GestureRecognizer<S> {
        self.recognizer
    }

    fn handle(&mut self, event: &HostEvent) -> HostResponse {
        let AdapterDispatch {
            events,
            prevent_default,
            ..
        } = self.adapter.translate(event);
        let mut gestures = Vec::new();
        for input in &events {
            gestures.extend(self.recognizer.process(input));
        }
        HostResponse {
            prevent_default,
            gestures,
        }
    }

    fn tick(&mut self, time_stamp: f64) -> Vec<GestureEvent> {
        let now = self.adapter.normalize_time(time_stamp);
        self.recognizer.tick(now)
    }

    fn unmounted(&mut self) {
        self.adapter.deactivate();
        self.recognizer.teardown();
    }
}

/// Scoped listener registration for a mounted [`GestureSurface`].
#[derive(Debug)]
pub struct SurfaceMount<'a, H: ListenerHost, S: GestureSink> {
    surface: &'a mut GestureSurface<S>,
    host: &'a mut H,
    registered: Vec<HostEventKind>,
}

impl<H: ListenerHost, S: GestureSink> SurfaceMount<'_, H, S> {
    /// Deliver one host event.
    pub fn handle(&mut self, event: &HostEvent) -> HostResponse {
        self.surface.handle(event)
    }

    /// Fire due timers at host time `time_stamp` (same clock as `Event.timeStamp`).
    pub fn tick(&mut self, time_stamp: f64) -> Vec<GestureEvent> {
        self.surface.tick(time_stamp)
    }

    /// Earliest pending timer, in normalized milliseconds.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.surface.recognizer.next_deadline()
    }

    /// Listener kinds this mount registered, in registration order.
    #[must_use]
    pub fn listeners(&self) -> &[HostEventKind] {
        &self.registered
    }

    #[must_use]
    pub fn recognizer(&self) -> &GestureRecognizer<S> {
        &self.surface.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut GestureRecognizer<S> {
        &mut self.surface.recognizer
    }

    /// Unregister listeners now.
    pub fn unmount(self) {}
}

impl<H: ListenerHost, S: GestureSink> Drop for SurfaceMount<'_, H, S> {
    fn drop(&mut self) {
        while let Some(kind) = self.registered.pop() {
            self.host.remove_listener(kind);
        }
        self.surface.unmounted();
        info!("gesture surface unmounted");
    }
}
