#![forbid(unsafe_code)]

//! Per-gesture user settings as data.
//!
//! [`GestureSettings`] is the exchange format between the registry and the
//! external persistence collaborator: a mapping from stable gesture id to
//! `{ enabled, sensitivity }`. With the `settings` feature it can be loaded
//! from and written back to TOML or JSON.
//!
//! ```toml
//! [shake]
//! enabled = true
//! sensitivity = 0.8
//!
//! [long-press]
//! enabled = false
//! ```
//!
//! Missing fields take their defaults (`enabled = true`,
//! `sensitivity = 0.5`). Unknown ids survive parsing so that settings written
//! by a newer build are not lost; the registry ignores them when applied.

use std::collections::BTreeMap;
#[cfg(feature = "settings")]
use std::path::Path;

#[cfg(feature = "settings")]
use serde::{Deserialize, Serialize};

use crate::gesture::GestureId;
use crate::registry::{DEFAULT_SENSITIVITY, MAX_SENSITIVITY, MIN_SENSITIVITY};

/// User-facing configuration of one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "settings", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "settings", serde(default))]
pub struct GestureSetting {
    pub enabled: bool,
    pub sensitivity: f32,
}

impl Default for GestureSetting {
    fn default() -> Self {
        Self {
            enabled: true,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

/// Mapping from gesture id string to its setting.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "settings", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "settings", serde(transparent))]
pub struct GestureSettings {
    entries: BTreeMap<String, GestureSetting>,
}

impl GestureSettings {
    /// Empty settings (every gesture keeps its current value when applied).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry for `id`.
    pub fn insert(&mut self, id: impl Into<String>, setting: GestureSetting) {
        self.entries.insert(id.into(), setting);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, id: GestureId, setting: GestureSetting) -> Self {
        self.insert(id.as_str(), setting);
        self
    }

    /// Entry for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GestureSetting> {
        self.entries.get(id)
    }

    /// Iterate `(id, setting)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GestureSetting)> {
        self.entries.iter().map(|(id, setting)| (id.as_str(), setting))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Report unknown ids and out-of-range sensitivities.
    ///
    /// The registry tolerates both (ignore / clamp); this exists so the
    /// settings screen can tell the user their stored file was off.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (id, setting) in &self.entries {
            if id.parse::<GestureId>().is_err() {
                errors.push(format!("unknown gesture id {id:?}"));
            }
            let s = setting.sensitivity;
            if !s.is_finite() || !(MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&s) {
                errors.push(format!(
                    "{id}.sensitivity must be in [{MIN_SENSITIVITY}, {MAX_SENSITIVITY}], got {s}"
                ));
            }
        }
        errors
    }

    /// Return `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, SettingsError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SettingsError::Validation(errors))
        }
    }
}

#[cfg(feature = "settings")]
impl GestureSettings {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        toml::from_str(s).map_err(SettingsError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(s).map_err(SettingsError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        toml::to_string(self).map_err(SettingsError::TomlSer)
    }

    /// Serialize to JSON.
    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        serde_json::to_string(self).map_err(SettingsError::Json)
    }
}

/// Errors from loading or storing gesture settings.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "settings")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "settings")]
    TomlSer(toml::ser::Error),
    /// JSON parse or serialization error.
    #[cfg(feature = "settings")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "settings")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "settings")]
            Self::TomlSer(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "settings")]
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "settings")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "settings")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "settings")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
