//! Focus areas: units of viewer attention produced by the focus manager.

use serde::{Deserialize, Serialize};

use crate::event::TimestampMs;
use crate::geometry::Rect;

/// Why the camera should look somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusReason {
    Click,
    Keydown,
    Drag,
    Scroll,
    Typing,
    UrlChange,
    HoveredCard,
    Hover,
    /// Nothing happened for a while; show the whole frame.
    Inactivity,
    /// Terminal full-frame marker emitted by the focus manager.
    FinalZoomout,
    /// Trailing zoom-out appended by the zoom scheduler.
    EndZoomout,
}

impl FocusReason {
    /// Reasons that deliberately frame the full picture.
    pub fn is_zoomout(self) -> bool {
        matches!(
            self,
            FocusReason::Inactivity | FocusReason::FinalZoomout | FocusReason::EndZoomout
        )
    }
}

/// A region of interest that becomes active at an output time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusArea {
    /// Output-time milliseconds.
    pub timestamp_ms: TimestampMs,
    /// Source-space rectangle.
    pub rect: Rect,
    pub reason: FocusReason,
}

impl FocusArea {
    pub fn new(timestamp_ms: TimestampMs, rect: Rect, reason: FocusReason) -> Self {
        Self {
            timestamp_ms,
            rect,
            reason,
        }
    }
}
