//! Draw strokes.
//!
//! The engine never interprets stroke contents — it logs them for
//! late-join replay and relays them to the room. The fields mirror what
//! canvas clients actually send.

use serde::{Deserialize, Serialize};

/// Where a stroke event sits in a pen gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    /// Pen down.
    Start,
    /// Pen moving.
    Draw,
    /// Pen up.
    End,
}

/// One point of a drawing gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub x: f32,
    pub y: f32,
    pub kind: StrokeKind,
    /// CSS color; `None` inherits the client's current pen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Brush size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_round_trip() {
        let stroke = Stroke {
            x: 10.5,
            y: 20.0,
            kind: StrokeKind::Draw,
            color: Some("#ff0000".into()),
            size: Some(4.0),
        };
        let bytes = serde_json::to_vec(&stroke).unwrap();
        let decoded: Stroke = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stroke, decoded);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let stroke = Stroke {
            x: 0.0,
            y: 0.0,
            kind: StrokeKind::Start,
            color: None,
            size: None,
        };
        let json = serde_json::to_string(&stroke).unwrap();
        assert!(!json.contains("color"));
        assert!(!json.contains("size"));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&StrokeKind::Start).unwrap();
        assert_eq!(json, "\"start\"");
    }
}
