#![forbid(unsafe_code)]

//! Gesture registry and threshold policy.
//!
//! [`GestureRegistry`] is the single source of truth for which gestures are
//! enabled and how sensitive they are. Detectors consult it before firing:
//! a disabled gesture never dispatches, no matter how strongly its
//! conditions are met.
//!
//! Sensitivity is a dial in `[0.1, 1.0]`; higher means a lower raw threshold.
//! Only the shake detector scales its threshold by sensitivity. Swipe, pinch,
//! rotate, double-tap and long-press thresholds are the fixed
//! [`RecognizerConfig`] values, reported through
//! [`GestureDescriptor::derived_threshold`] for display.

use tracing::{debug, warn};

use crate::config::RecognizerConfig;
use crate::gesture::{GestureId, GestureMask};
use crate::settings::{GestureSetting, GestureSettings};

/// Lowest accepted sensitivity.
pub const MIN_SENSITIVITY: f32 = 0.1;
/// Highest accepted sensitivity.
pub const MAX_SENSITIVITY: f32 = 1.0;
/// Sensitivity assigned at construction.
pub const DEFAULT_SENSITIVITY: f32 = 0.5;

/// Configuration of one gesture kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDescriptor {
    pub id: GestureId,
    pub enabled: bool,
    pub sensitivity: f32,
    /// Raw threshold the detector currently requires, in the detector's own
    /// unit (px, px/ms ratio, radians, m/s², or ms).
    pub derived_threshold: f32,
}

/// Threshold curve for one gesture: `base` scaled by `(1 - sensitivity)`
/// when `scaled`, otherwise `base` unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ThresholdCurve {
    base: f32,
    scaled: bool,
}

impl ThresholdCurve {
    fn at(self, sensitivity: f32) -> f32 {
        if self.scaled {
            self.base * (1.0 - sensitivity)
        } else {
            self.base
        }
    }

    fn for_gesture(id: GestureId, config: &RecognizerConfig) -> Self {
        let fixed = |base: f32| Self {
            base,
            scaled: false,
        };
        match id {
            GestureId::SwipeLeft
            | GestureId::SwipeRight
            | GestureId::SwipeUp
            | GestureId::SwipeDown => fixed(config.swipe_min_distance),
            GestureId::PinchIn | GestureId::PinchOut => fixed(config.pinch_threshold),
            GestureId::Rotate => fixed(config.rotate_threshold),
            GestureId::DoubleTap => fixed(config.double_tap_max_ms as f32),
            GestureId::LongPress => fixed(config.long_press_delay_ms as f32),
            GestureId::Shake => Self {
                base: config.shake_base_threshold,
                scaled: true,
            },
        }
    }
}

/// Clamp a requested sensitivity into range. Non-finite input yields `None`.
#[must_use]
pub fn clamp_sensitivity(value: f32) -> Option<f32> {
    value
        .is_finite()
        .then(|| value.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY))
}

/// Enabled flags and sensitivities for every gesture kind.
#[derive(Debug, Clone)]
pub struct GestureRegistry {
    descriptors: [GestureDescriptor; GestureId::ALL.len()],
    curves: [ThresholdCurve; GestureId::ALL.len()],
}

impl Default for GestureRegistry {
    fn default() -> Self {
        Self::new(&RecognizerConfig::default())
    }
}

impl GestureRegistry {
    /// Create a registry with every gesture enabled at the default sensitivity.
    #[must_use]
    pub fn new(config: &RecognizerConfig) -> Self {
        let curves = GestureId::ALL.map(|id| ThresholdCurve::for_gesture(id, config));
        let descriptors = GestureId::ALL.map(|id| GestureDescriptor {
            id,
            enabled: true,
            sensitivity: DEFAULT_SENSITIVITY,
            derived_threshold: curves[id.index()].at(DEFAULT_SENSITIVITY),
        });
        Self {
            descriptors,
            curves,
        }
    }

    /// Whether `id` may fire.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, id: GestureId) -> bool {
        self.descriptors[id.index()].enabled
    }

    /// Current sensitivity of `id`.
    #[inline]
    #[must_use]
    pub fn sensitivity_of(&self, id: GestureId) -> f32 {
        self.descriptors[id.index()].sensitivity
    }

    /// Raw threshold the detector for `id` currently requires.
    #[inline]
    #[must_use]
    pub fn threshold_of(&self, id: GestureId) -> f32 {
        self.descriptors[id.index()].derived_threshold
    }

    /// Descriptor of `id`.
    #[must_use]
    pub fn descriptor(&self, id: GestureId) -> &GestureDescriptor {
        &self.descriptors[id.index()]
    }

    /// All descriptors, in [`GestureId::ALL`] order.
    #[must_use]
    pub fn descriptors(&self) -> &[GestureDescriptor] {
        &self.descriptors
    }

    /// Set of currently enabled gestures.
    #[must_use]
    pub fn enabled_mask(&self) -> GestureMask {
        self.descriptors
            .iter()
            .filter(|d| d.enabled)
            .fold(GestureMask::empty(), |mask, d| mask | d.id.mask())
    }

    /// Enable or disable `id`.
    pub fn set_enabled(&mut self, id: GestureId, enabled: bool) {
        let descriptor = &mut self.descriptors[id.index()];
        if descriptor.enabled != enabled {
            debug!(gesture = %id, enabled, "gesture toggled");
        }
        descriptor.enabled = enabled;
    }

    /// Set the sensitivity of `id`, clamped to `[0.1, 1.0]`.
    ///
    /// Non-finite values are ignored.
    pub fn set_sensitivity(&mut self, id: GestureId, sensitivity: f32) {
        let Some(clamped) = clamp_sensitivity(sensitivity) else {
            warn!(gesture = %id, sensitivity, "ignoring non-finite sensitivity");
            return;
        };
        if clamped != sensitivity {
            debug!(gesture = %id, requested = sensitivity, clamped, "sensitivity clamped");
        }
        let curve = self.curves[id.index()];
        let descriptor = &mut self.descriptors[id.index()];
        descriptor.sensitivity = clamped;
        descriptor.derived_threshold = curve.at(clamped);
    }

    /// [`set_enabled`](Self::set_enabled) by string id. Unknown ids are ignored.
    ///
    /// Returns `true` if the id was recognized.
    pub fn set_enabled_by_name(&mut self, id: &str, enabled: bool) -> bool {
        match id.parse::<GestureId>() {
            Ok(id) => {
                self.set_enabled(id, enabled);
                true
            }
            Err(err) => {
                warn!(%err, "ignoring enable update");
                false
            }
        }
    }

    /// [`set_sensitivity`](Self::set_sensitivity) by string id. Unknown ids are ignored.
    ///
    /// Returns `true` if the id was recognized.
    pub fn set_sensitivity_by_name(&mut self, id: &str, sensitivity: f32) -> bool {
        match id.parse::<GestureId>() {
            Ok(id) => {
                self.set_sensitivity(id, sensitivity);
                true
            }
            Err(err) => {
                warn!(%err, "ignoring sensitivity update");
                false
            }
        }
    }

    /// Apply every entry of `settings`; gestures not mentioned keep their values.
    pub fn apply_settings(&mut self, settings: &GestureSettings) {
        for (id, setting) in settings.iter() {
            if self.set_enabled_by_name(id, setting.enabled) {
                self.set_sensitivity_by_name(id, setting.sensitivity);
            }
        }
    }

    /// Snapshot of every gesture, for writing back to persistence.
    #[must_use]
    pub fn settings(&self) -> GestureSettings {
        self.descriptors
            .iter()
            .fold(GestureSettings::new(), |settings, d| {
                settings.with(
                    d.id,
                    GestureSetting {
                        enabled: d.enabled,
                        sensitivity: d.sensitivity,
                    },
                )
            })
    }
}
