#![forbid(unsafe_code)]

//! Host event → normalized input translation.
//!
//! [`InputAdapter`] is deterministic given its inputs: it maps each
//! [`HostEvent`] to zero or more [`InputEvent`]s and reports whether the host
//! should suppress its default behavior (native scroll and zoom).
//!
//! Browsers deliver a single finger both as touch events and as compatibility
//! pointer events. The adapter locks onto whichever family starts an
//! interaction and drops the other until every contact has ended.

use revel_core::event::{ContactId, InputEvent};
use revel_core::geometry::{Acceleration, ContactPoint, Millis};
use tracing::debug;
use web_time::Instant;

use crate::host_event::{HostEvent, HostTouch};

/// Adapter tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdapterConfig {
    /// Client-space x of the surface's top-left corner.
    pub origin_x: f32,
    /// Client-space y of the surface's top-left corner.
    pub origin_y: f32,
    /// Request default suppression for contact events while active.
    pub suppress_default: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            suppress_default: true,
        }
    }
}

/// Which host event family owns the current interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFamily {
    Pointer,
    Touch,
}

/// Reason a host event produced no normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterIgnoredReason {
    /// The surface is not mounted.
    Inactive,
    /// Another event family owns the interaction.
    FamilyLocked { owner: InputFamily },
    /// Move or end for a contact that never started (e.g. hover moves).
    UntrackedContact,
    /// Start for a contact that is already down.
    DuplicateContact,
    /// Motion sample without an acceleration vector.
    NoAcceleration,
    /// Touch event with an empty changed-touch list.
    NoTouches,
}

/// Result of translating one host event.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterDispatch {
    /// Normalized events to feed the recognizer, in order.
    pub events: Vec<InputEvent>,
    /// Whether the host must call `preventDefault()`.
    pub prevent_default: bool,
    /// Set when nothing was emitted.
    pub ignored: Option<AdapterIgnoredReason>,
}

impl AdapterDispatch {
    fn emitted(events: Vec<InputEvent>, prevent_default: bool) -> Self {
        Self {
            events,
            prevent_default,
            ignored: None,
        }
    }

    fn ignored(reason: AdapterIgnoredReason, prevent_default: bool) -> Self {
        Self {
            events: Vec::new(),
            prevent_default,
            ignored: Some(reason),
        }
    }
}

/// Converts host `Event.timeStamp` values into non-decreasing milliseconds.
///
/// Stamps that are zero, negative, or non-finite are replaced by the time
/// elapsed since the normalizer was created.
#[derive(Debug, Clone)]
pub struct TimestampNormalizer {
    epoch: Instant,
    last: Millis,
}

impl TimestampNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_epoch(Instant::now())
    }

    /// Normalizer whose fallback clock counts from `epoch`.
    #[must_use]
    pub fn with_epoch(epoch: Instant) -> Self {
        Self { epoch, last: 0 }
    }

    /// Normalize one host stamp.
    pub fn normalize(&mut self, raw: f64) -> Millis {
        let candidate = if raw.is_finite() && raw > 0.0 {
            // Saturating float-to-int cast; fractional milliseconds are dropped.
            raw as Millis
        } else {
            self.fallback()
        };
        self.last = self.last.max(candidate);
        self.last
    }

    /// Last value handed out.
    #[must_use]
    pub const fn last(&self) -> Millis {
        self.last
    }

    fn fallback(&self) -> Millis {
        Millis::try_from(self.epoch.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateful host → normalized event translator for one gesture surface.
#[derive(Debug, Clone)]
pub struct InputAdapter {
    config: AdapterConfig,
    active: bool,
    family: Option<InputFamily>,
    contacts: Vec<u32>,
    clock: TimestampNormalizer,
}

impl InputAdapter {
    /// Create an inactive adapter.
    #[must_use]
    pub fn new(config: AdapterConfig) -> Self {
        Self::with_clock(config, TimestampNormalizer::new())
    }

    /// Create an inactive adapter with an explicit timestamp normalizer.
    #[must_use]
    pub fn with_clock(config: AdapterConfig, clock: TimestampNormalizer) -> Self {
        Self {
            config,
            active: false,
            family: None,
            contacts: Vec::new(),
            clock,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Move the surface origin (after layout changes).
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.config.origin_x = x;
        self.config.origin_y = y;
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Start accepting host events.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop accepting host events and forget every contact.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.release();
    }

    /// Family owning the current interaction.
    #[must_use]
    pub const fn family(&self) -> Option<InputFamily> {
        self.family
    }

    /// Host ids currently down.
    #[must_use]
    pub fn active_contacts(&self) -> &[u32] {
        &self.contacts
    }

    /// Normalize a host timestamp without translating an event.
    pub fn normalize_time(&mut self, raw: f64) -> Millis {
        self.clock.normalize(raw)
    }

    /// Translate one host event.
    pub fn translate(&mut self, event: &HostEvent) -> AdapterDispatch {
        if !self.active {
            return AdapterDispatch::ignored(AdapterIgnoredReason::Inactive, false);
        }
        let now = self.clock.normalize(event.time_stamp());
        let prevent = self.config.suppress_default && !event.kind().is_window_level();

        let dispatch = match event {
            HostEvent::PointerDown(p) => self
                .claim(InputFamily::Pointer)
                .and_then(|()| self.starts(&[HostTouch::new(p.pointer_id, p.x, p.y)], now)),
            HostEvent::PointerMove(p) => self
                .owned_by(InputFamily::Pointer)
                .and_then(|()| self.moves(&[HostTouch::new(p.pointer_id, p.x, p.y)], now)),
            HostEvent::PointerUp(p) | HostEvent::PointerCancel(p) => self
                .owned_by(InputFamily::Pointer)
                .and_then(|()| self.ends(&[HostTouch::new(p.pointer_id, p.x, p.y)], now)),
            HostEvent::TouchStart(list) => self
                .claim(InputFamily::Touch)
                .and_then(|()| self.starts(&list.changed_touches, now)),
            HostEvent::TouchMove(list) => self
                .owned_by(InputFamily::Touch)
                .and_then(|()| self.moves(&list.changed_touches, now)),
            HostEvent::TouchEnd(list) | HostEvent::TouchCancel(list) => self
                .owned_by(InputFamily::Touch)
                .and_then(|()| self.ends(&list.changed_touches, now)),
            HostEvent::DeviceMotion(motion) => match motion.acceleration {
                Some(a) => Ok(vec![InputEvent::MotionSample {
                    acceleration: Acceleration::new(a.x, a.y, a.z),
                    timestamp: now,
                }]),
                None => Err(AdapterIgnoredReason::NoAcceleration),
            },
        };

        match dispatch {
            Ok(events) => AdapterDispatch::emitted(events, prevent),
            Err(reason) => {
                debug!(kind = event.kind().dom_name(), ?reason, "host event ignored");
                AdapterDispatch::ignored(reason, prevent)
            }
        }
    }

    fn claim(&mut self, family: InputFamily) -> Result<(), AdapterIgnoredReason> {
        match self.family {
            None => {
                self.family = Some(family);
                Ok(())
            }
            Some(owner) if owner == family => Ok(()),
            Some(owner) => Err(AdapterIgnoredReason::FamilyLocked { owner }),
        }
    }

    fn owned_by(&self, family: InputFamily) -> Result<(), AdapterIgnoredReason> {
        match self.family {
            Some(owner) if owner == family => Ok(()),
            Some(owner) => Err(AdapterIgnoredReason::FamilyLocked { owner }),
            None => Err(AdapterIgnoredReason::UntrackedContact),
        }
    }

    fn point(&self, touch: &HostTouch, now: Millis) -> ContactPoint {
        ContactPoint::new(
            touch.x - self.config.origin_x,
            touch.y - self.config.origin_y,
            now,
        )
    }

    fn starts(
        &mut self,
        touches: &[HostTouch],
        now: Millis,
    ) -> Result<Vec<InputEvent>, AdapterIgnoredReason> {
        let mut out = Vec::with_capacity(touches.len());
        for touch in touches {
            if self.contacts.contains(&touch.identifier) {
                continue;
            }
            self.contacts.push(touch.identifier);
            out.push(InputEvent::ContactStart {
                id: ContactId(touch.identifier),
                point: self.point(touch, now),
            });
        }
        self.settle(out, touches.is_empty(), AdapterIgnoredReason::DuplicateContact)
    }

    fn moves(
        &mut self,
        touches: &[HostTouch],
        now: Millis,
    ) -> Result<Vec<InputEvent>, AdapterIgnoredReason> {
        let out: Vec<InputEvent> = touches
            .iter()
            .filter(|touch| self.contacts.contains(&touch.identifier))
            .map(|touch| InputEvent::ContactMove {
                id: ContactId(touch.identifier),
                point: self.point(touch, now),
            })
            .collect();
        self.settle(out, touches.is_empty(), AdapterIgnoredReason::UntrackedContact)
    }

    fn ends(
        &mut self,
        touches: &[HostTouch],
        now: Millis,
    ) -> Result<Vec<InputEvent>, AdapterIgnoredReason> {
        let mut out = Vec::with_capacity(touches.len());
        for touch in touches {
            let Some(slot) = self.contacts.iter().position(|&id| id == touch.identifier) else {
                continue;
            };
            self.contacts.remove(slot);
            out.push(InputEvent::ContactEnd {
                id: ContactId(touch.identifier),
                point: self.point(touch, now),
            });
        }
        if self.contacts.is_empty() {
            self.family = None;
        }
        self.settle(out, touches.is_empty(), AdapterIgnoredReason::UntrackedContact)
    }

    fn settle(
        &mut self,
        out: Vec<InputEvent>,
        no_touches: bool,
        otherwise: AdapterIgnoredReason,
    ) -> Result<Vec<InputEvent>, AdapterIgnoredReason> {
        if !out.is_empty() {
            return Ok(out);
        }
        if self.contacts.is_empty() {
            self.family = None;
        }
        Err(if no_touches {
            AdapterIgnoredReason::NoTouches
        } else {
            otherwise
        })
    }

    fn release(&mut self) {
        self.contacts.clear();
        self.family = None;
    }
}
