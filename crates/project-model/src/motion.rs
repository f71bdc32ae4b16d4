//! Camera keyframes and spotlight overlays consumed by the renderer.

use serde::{Deserialize, Serialize};

use crate::event::TimestampMs;
use crate::focus::FocusReason;
use crate::geometry::Rect;

/// Who authored a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MotionKind {
    /// Generated by the zoom scheduler.
    #[default]
    Auto,
    /// Placed by the user in the editor.
    Manual,
}

/// A camera animation segment.
///
/// The motion ends at `output_end_time_ms`, lasts `duration_ms`, and eases
/// toward `rect` (output space). A following motion interrupts it as soon
/// as that motion starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportMotion {
    pub id: String,
    pub output_end_time_ms: TimestampMs,
    pub duration_ms: f64,
    pub rect: Rect,
    pub reason: FocusReason,
    #[serde(default)]
    pub kind: MotionKind,
}

impl ViewportMotion {
    /// Output time at which this motion begins.
    pub fn output_start_time_ms(&self) -> TimestampMs {
        self.output_end_time_ms - self.duration_ms.max(0.0)
    }
}

/// A highlight overlay for one UI element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spotlight {
    pub id: String,
    pub output_start_time_ms: TimestampMs,
    pub output_end_time_ms: TimestampMs,
    /// Element bounds in source space, for cropping.
    pub source_rect: Rect,
    /// Element bounds in output space.
    pub output_rect: Rect,
    /// Output-space corner radii: top-left, top-right, bottom-right,
    /// bottom-left.
    pub border_radius: [f64; 4],
    /// Enlargement factor applied around the element's center.
    pub scale: f64,
    pub reason: FocusReason,
}
