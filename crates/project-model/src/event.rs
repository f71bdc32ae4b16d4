//! Input event types for the ZoomReel event stream.
//!
//! Events arrive from the capture layer already categorized by kind. All
//! timestamps are in source (pre-trim) milliseconds and all positions are
//! source-video pixels.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Source-time timestamp in milliseconds since recording start.
pub type TimestampMs = f64;

/// A single recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Source-time milliseconds.
    #[serde(rename = "t")]
    pub timestamp_ms: TimestampMs,

    /// Pointer position when the event fired.
    pub mouse: Point,

    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Discriminated union of event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Mouse button click.
    Click {
        /// Bounds of the clicked element, when the page reported one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_rect: Option<Rect>,
    },

    /// Raw pointer sample. Feeds hover detection only.
    MousePosition,

    /// Single key press.
    Keydown {
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_rect: Option<Rect>,
    },

    /// Press-move-release gesture.
    Drag {
        end_time_ms: TimestampMs,
        end_position: Point,
    },

    /// Scroll wheel / touchpad scroll.
    Scroll {
        delta: Point,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_rect: Option<Rect>,
    },

    /// A burst of keystrokes into one field.
    Typing {
        end_time_ms: TimestampMs,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_rect: Option<Rect>,
    },

    /// Navigation to a new URL.
    UrlChange { url: String },

    /// Long dwell over a UI card whose bounds and corner radii are known.
    HoveredCard {
        end_time_ms: TimestampMs,
        target_rect: Rect,
        /// Corner radii in source pixels: top-left, top-right,
        /// bottom-right, bottom-left.
        #[serde(default)]
        corner_radius: [f64; 4],
    },

    /// Derived from the mouse-position stream by hover detection.
    Hover {
        end_time_ms: TimestampMs,
        rect: Rect,
    },
}

impl InputEvent {
    pub fn new(timestamp_ms: TimestampMs, mouse: Point, kind: EventKind) -> Self {
        Self {
            timestamp_ms,
            mouse,
            kind,
        }
    }

    /// Create a click event without element bounds.
    pub fn click(timestamp_ms: TimestampMs, x: f64, y: f64) -> Self {
        Self::new(
            timestamp_ms,
            Point::new(x, y),
            EventKind::Click { target_rect: None },
        )
    }

    /// Create a pointer sample.
    pub fn mouse_position(timestamp_ms: TimestampMs, x: f64, y: f64) -> Self {
        Self::new(timestamp_ms, Point::new(x, y), EventKind::MousePosition)
    }

    /// Create a hovered-card event.
    pub fn hovered_card(
        timestamp_ms: TimestampMs,
        end_time_ms: TimestampMs,
        target_rect: Rect,
        corner_radius: [f64; 4],
    ) -> Self {
        Self::new(
            timestamp_ms,
            target_rect.center(),
            EventKind::HoveredCard {
                end_time_ms,
                target_rect,
                corner_radius,
            },
        )
    }

    /// Stable snake_case name of the event kind.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            EventKind::Click { .. } => "click",
            EventKind::MousePosition => "mouse_position",
            EventKind::Keydown { .. } => "keydown",
            EventKind::Drag { .. } => "drag",
            EventKind::Scroll { .. } => "scroll",
            EventKind::Typing { .. } => "typing",
            EventKind::UrlChange { .. } => "url_change",
            EventKind::HoveredCard { .. } => "hovered_card",
            EventKind::Hover { .. } => "hover",
        }
    }

    /// End of the event in source time, for kinds that span an interval.
    pub fn end_time_ms(&self) -> Option<TimestampMs> {
        match &self.kind {
            EventKind::Drag { end_time_ms, .. }
            | EventKind::Typing { end_time_ms, .. }
            | EventKind::HoveredCard { end_time_ms, .. }
            | EventKind::Hover { end_time_ms, .. } => Some(*end_time_ms),
            EventKind::Click { .. }
            | EventKind::MousePosition
            | EventKind::Keydown { .. }
            | EventKind::Scroll { .. }
            | EventKind::UrlChange { .. } => None,
        }
    }

    /// Element bounds reported with the event, if any.
    pub fn target_rect(&self) -> Option<Rect> {
        match &self.kind {
            EventKind::Click { target_rect }
            | EventKind::Keydown { target_rect, .. }
            | EventKind::Scroll { target_rect, .. }
            | EventKind::Typing { target_rect, .. } => *target_rect,
            EventKind::HoveredCard { target_rect, .. } => Some(*target_rect),
            EventKind::Hover { rect, .. } => Some(*rect),
            EventKind::MousePosition
            | EventKind::Drag { .. }
            | EventKind::UrlChange { .. } => None,
        }
    }
}

/// A pointer sample extracted from the mouse-position stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseSample {
    pub timestamp_ms: TimestampMs,
    pub position: Point,
}

/// Categorized event streams, each sorted by source timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventStreams {
    /// Raw pointer samples.
    pub mouse_positions: Vec<MouseSample>,

    /// Every other event kind.
    pub interactions: Vec<InputEvent>,
}

impl EventStreams {
    /// Split a mixed event list into streams. Non-finite timestamps are
    /// dropped; each stream is stably sorted.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut streams = Self::default();
        for event in events {
            if !event.timestamp_ms.is_finite() {
                continue;
            }
            match event.kind {
                EventKind::MousePosition => streams.mouse_positions.push(MouseSample {
                    timestamp_ms: event.timestamp_ms,
                    position: event.mouse,
                }),
                EventKind::Click { .. }
                | EventKind::Keydown { .. }
                | EventKind::Drag { .. }
                | EventKind::Scroll { .. }
                | EventKind::Typing { .. }
                | EventKind::UrlChange { .. }
                | EventKind::HoveredCard { .. }
                | EventKind::Hover { .. } => streams.interactions.push(event),
            }
        }
        streams
            .mouse_positions
            .sort_by(|a, b| a.timestamp_ms.total_cmp(&b.timestamp_ms));
        streams
            .interactions
            .sort_by(|a, b| a.timestamp_ms.total_cmp(&b.timestamp_ms));
        streams
    }

    /// Hovered-card events, in timestamp order.
    pub fn hovered_cards(&self) -> impl Iterator<Item = &InputEvent> {
        self.interactions
            .iter()
            .filter(|e| matches!(e.kind, EventKind::HoveredCard { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.mouse_positions.is_empty() && self.interactions.is_empty()
    }
}

/// Parse events from JSONL content (one JSON object per line).
pub fn parse_events(jsonl: &str) -> Result<Vec<InputEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[InputEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let event = InputEvent::click(1500.0, 10.0, 20.0);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"t\":1500.0"));
        assert!(json.contains("\"type\":\"click\""));
        assert!(!json.contains("target_rect"));
    }

    #[test]
    fn test_hovered_card_parses_with_default_radius() {
        let raw = r#"{"t":100.0,"mouse":{"x":1.0,"y":2.0},"type":"hovered_card",
            "end_time_ms":2500.0,"target_rect":{"x":0.0,"y":0.0,"width":50.0,"height":40.0}}"#;
        let event: InputEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.end_time_ms(), Some(2500.0));
        match event.kind {
            EventKind::HoveredCard { corner_radius, .. } => assert_eq!(corner_radius, [0.0; 4]),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_jsonl_parse_skips_comments() {
        let events = vec![
            InputEvent::mouse_position(0.0, 1.0, 1.0),
            InputEvent::new(
                50.0,
                Point::new(3.0, 4.0),
                EventKind::UrlChange {
                    url: "https://example.com".to_string(),
                },
            ),
        ];
        let jsonl = format!("# header\n{}", serialize_events(&events).unwrap());
        let parsed = parse_events(&jsonl).unwrap();
        assert_eq!(parsed, events);
    }

    #[test]
    fn test_streams_partition_and_sort() {
        let streams = EventStreams::from_events(vec![
            InputEvent::click(300.0, 0.0, 0.0),
            InputEvent::mouse_position(200.0, 1.0, 1.0),
            InputEvent::click(100.0, 0.0, 0.0),
            InputEvent::mouse_position(f64::NAN, 1.0, 1.0),
            InputEvent::mouse_position(50.0, 2.0, 2.0),
            InputEvent::hovered_card(400.0, 900.0, Rect::new(0.0, 0.0, 10.0, 10.0), [4.0; 4]),
        ]);

        assert_eq!(streams.mouse_positions.len(), 2);
        assert_eq!(streams.mouse_positions[0].timestamp_ms, 50.0);
        assert_eq!(streams.interactions.len(), 3);
        assert_eq!(streams.interactions[0].timestamp_ms, 100.0);
        assert_eq!(streams.hovered_cards().count(), 1);
    }

    #[test]
    fn test_target_rect_by_kind() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let typing = InputEvent::new(
            0.0,
            Point::default(),
            EventKind::Typing {
                end_time_ms: 10.0,
                target_rect: Some(rect),
            },
        );
        assert_eq!(typing.target_rect(), Some(rect));
        assert_eq!(typing.kind_name(), "typing");

        let drag = InputEvent::new(
            0.0,
            Point::default(),
            EventKind::Drag {
                end_time_ms: 10.0,
                end_position: Point::new(5.0, 5.0),
            },
        );
        assert_eq!(drag.target_rect(), None);
        assert_eq!(drag.end_time_ms(), Some(10.0));
    }
}
