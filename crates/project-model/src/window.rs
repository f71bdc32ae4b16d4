//! Kept segments of source time.

use serde::{Deserialize, Serialize};

use crate::event::TimestampMs;

/// A kept segment `[start_ms, end_ms]` of the source recording.
///
/// Gaps between windows are cut from the output video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputWindow {
    pub id: String,
    pub start_ms: TimestampMs,
    pub end_ms: TimestampMs,
}

impl OutputWindow {
    pub fn new(id: impl Into<String>, start_ms: TimestampMs, end_ms: TimestampMs) -> Self {
        Self {
            id: id.into(),
            start_ms,
            end_ms,
        }
    }

    /// Length of the window; inverted windows count as empty.
    pub fn duration_ms(&self) -> f64 {
        (self.end_ms - self.start_ms).max(0.0)
    }

    pub fn contains(&self, t: TimestampMs) -> bool {
        t >= self.start_ms && t <= self.end_ms
    }
}

/// Problems found in a window list. Empty when the list is usable as-is.
pub fn window_issues(windows: &[OutputWindow]) -> Vec<String> {
    let mut issues = vec![];
    for w in windows {
        if !(w.start_ms.is_finite() && w.end_ms.is_finite()) {
            issues.push(format!("window {} has a non-finite bound", w.id));
        } else if w.end_ms < w.start_ms {
            issues.push(format!(
                "window {} ends ({}) before it starts ({})",
                w.id, w.end_ms, w.start_ms
            ));
        }
    }
    for pair in windows.windows(2) {
        if pair[1].start_ms < pair[0].start_ms {
            issues.push(format!(
                "window {} starts before preceding window {}",
                pair[1].id, pair[0].id
            ));
        } else if pair[1].start_ms < pair[0].end_ms {
            issues.push(format!(
                "window {} overlaps window {}",
                pair[1].id, pair[0].id
            ));
        }
    }
    issues
}
