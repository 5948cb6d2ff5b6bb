#![forbid(unsafe_code)]

//! JSON decoding of host events.
//!
//! JS bridges that cannot construct [`HostEvent`] values directly serialize
//! the relevant DOM fields instead:
//!
//! ```json
//! {"type":"pointerdown","pointerId":1,"x":10.5,"y":20,"timeStamp":1234.5}
//! {"type":"touchmove","changedTouches":[{"identifier":0,"x":1,"y":2}],"timeStamp":50}
//! {"type":"devicemotion","acceleration":{"x":0.1,"y":9.8,"z":0.0},"timeStamp":60}
//! ```
//!
//! Event types the gesture surface does not listen to decode to `Ok(None)`.

use serde::Deserialize;

use crate::host_event::{
    HostAcceleration, HostEvent, HostMotion, HostPointer, HostTouch, HostTouchList,
};

/// Errors from parsing host event JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEventParseError {
    /// Malformed JSON or a field of the wrong type.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
}

impl core::fmt::Display for HostEventParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for HostEventParseError {}

#[derive(Debug, Deserialize)]
struct RawTouch {
    identifier: u32,
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct RawAcceleration {
    x: Option<f32>,
    y: Option<f32>,
    z: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHostEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    pointer_id: Option<u32>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default)]
    changed_touches: Option<Vec<RawTouch>>,
    #[serde(default)]
    acceleration: Option<RawAcceleration>,
    #[serde(default)]
    time_stamp: Option<f64>,
}

/// Parse one JSON-encoded host event.
///
/// Returns `Ok(None)` for event types the surface does not handle and `Err`
/// for malformed JSON or missing required fields. A missing `timeStamp`
/// decodes as `0.0`, which the adapter replaces with its own clock.
pub fn parse_host_event(json: &str) -> Result<Option<HostEvent>, HostEventParseError> {
    let raw: RawHostEvent =
        serde_json::from_str(json).map_err(|e| HostEventParseError::Json(e.to_string()))?;
    let time_stamp = raw.time_stamp.unwrap_or(0.0);

    let event = match raw.kind.as_str() {
        "pointerdown" => HostEvent::PointerDown(pointer(&raw, time_stamp)?),
        "pointermove" => HostEvent::PointerMove(pointer(&raw, time_stamp)?),
        "pointerup" => HostEvent::PointerUp(pointer(&raw, time_stamp)?),
        "pointercancel" => HostEvent::PointerCancel(pointer(&raw, time_stamp)?),
        "touchstart" => HostEvent::TouchStart(touches(&raw, time_stamp)?),
        "touchmove" => HostEvent::TouchMove(touches(&raw, time_stamp)?),
        "touchend" => HostEvent::TouchEnd(touches(&raw, time_stamp)?),
        "touchcancel" => HostEvent::TouchCancel(touches(&raw, time_stamp)?),
        "devicemotion" => HostEvent::DeviceMotion(motion(&raw, time_stamp)),
        _ => return Ok(None),
    };
    Ok(Some(event))
}

/// Parse a JSON array of host events, skipping unhandled types.
pub fn parse_host_events(json: &str) -> Result<Vec<HostEvent>, HostEventParseError> {
    let items: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| HostEventParseError::Json(e.to_string()))?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(event) = parse_host_event(&item.to_string())? {
            out.push(event);
        }
    }
    Ok(out)
}

fn pointer(raw: &RawHostEvent, time_stamp: f64) -> Result<HostPointer, HostEventParseError> {
    let pointer_id = raw
        .pointer_id
        .ok_or(HostEventParseError::MissingField("pointerId"))?;
    let x = raw.x.ok_or(HostEventParseError::MissingField("x"))?;
    let y = raw.y.ok_or(HostEventParseError::MissingField("y"))?;
    Ok(HostPointer::new(pointer_id, x, y, time_stamp))
}

fn touches(raw: &RawHostEvent, time_stamp: f64) -> Result<HostTouchList, HostEventParseError> {
    let changed = raw
        .changed_touches
        .as_ref()
        .ok_or(HostEventParseError::MissingField("changedTouches"))?;
    Ok(HostTouchList {
        changed_touches: changed
            .iter()
            .map(|t| HostTouch::new(t.identifier, t.x, t.y))
            .collect(),
        time_stamp,
    })
}

fn motion(raw: &RawHostEvent, time_stamp: f64) -> HostMotion {
    // Browsers report `null` axes on devices without an accelerometer.
    let acceleration = raw.acceleration.as_ref().and_then(|a| match (a.x, a.y, a.z) {
        (Some(x), Some(y), Some(z)) => Some(HostAcceleration::new(x, y, z)),
        _ => None,
    });
    HostMotion {
        acceleration,
        time_stamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_down() {
        let ev = parse_host_event(
            r#"{"type":"pointerdown","pointerId":1,"x":10.5,"y":20,"timeStamp":1234.5}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            ev,
            HostEvent::PointerDown(HostPointer::new(1, 10.5, 20.0, 1234.5))
        );
    }

    #[test]
    fn pointer_cancel() {
        let ev = parse_host_event(r#"{"type":"pointercancel","pointerId":2,"x":0,"y":0}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            ev,
            HostEvent::PointerCancel(HostPointer::new(2, 0.0, 0.0, 0.0))
        );
    }

    #[test]
    fn touch_move_with_changed_touches() {
        let ev = parse_host_event(
            r#"{"type":"touchmove","changedTouches":[{"identifier":0,"x":1,"y":2},{"identifier":3,"x":4,"y":5}],"timeStamp":50}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            ev,
            HostEvent::touch_move(&[HostTouch::new(0, 1.0, 2.0), HostTouch::new(3, 4.0, 5.0)], 50.0)
        );
    }

    #[test]
    fn device_motion_with_and_without_vector() {
        let ev = parse_host_event(
            r#"{"type":"devicemotion","acceleration":{"x":0.5,"y":9.5,"z":0},"timeStamp":60}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            ev,
            HostEvent::motion(Some(HostAcceleration::new(0.5, 9.5, 0.0)), 60.0)
        );

        let ev = parse_host_event(r#"{"type":"devicemotion","acceleration":null}"#)
            .unwrap()
            .unwrap();
        assert_eq!(ev, HostEvent::motion(None, 0.0));

        let ev = parse_host_event(
            r#"{"type":"devicemotion","acceleration":{"x":null,"y":1,"z":2}}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(ev, HostEvent::motion(None, 0.0));
    }

    #[test]
    fn unknown_type_is_none() {
        assert_eq!(parse_host_event(r#"{"type":"wheel","x":1}"#), Ok(None));
    }

    #[test]
    fn missing_fields() {
        assert_eq!(
            parse_host_event(r#"{"type":"pointerup","x":1,"y":1}"#),
            Err(HostEventParseError::MissingField("pointerId"))
        );
        assert_eq!(
            parse_host_event(r#"{"type":"touchend"}"#),
            Err(HostEventParseError::MissingField("changedTouches"))
        );
    }

    #[test]
    fn malformed_json() {
        let err = parse_host_event("{not json").unwrap_err();
        assert!(matches!(err, HostEventParseError::Json(_)));
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[test]
    fn batch_skips_unhandled() {
        let events = parse_host_events(
            r#"[{"type":"pointerdown","pointerId":1,"x":0,"y":0,"timeStamp":1},
                {"type":"keydown"},
                {"type":"pointerup","pointerId":1,"x":0,"y":0,"timeStamp":2}]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 2);
        assert!(parse_host_events(r#"{"type":"pointerdown"}"#).is_err());
    }
}
