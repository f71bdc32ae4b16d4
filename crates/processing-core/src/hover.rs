//! Hover detection on the pointer stream.
//!
//! A hover is a maximal run of consecutive samples whose bounding box fits
//! inside a square of side `hover_box_fraction × max(source dimension)`,
//! with no gap between samples longer than the minimum hover duration, and
//! lasting at least that long.
//! When a sample overflows the box, the run slides forward to the longest
//! suffix that still fits.

use zoomreel_project_model::event::MouseSample;
use zoomreel_project_model::geometry::{Rect, Size};
use zoomreel_project_model::settings::FocusSettings;

/// A hover found by [`HoverDetector::find_hover`]. Times are output time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedHover {
    pub start_ms: f64,
    pub end_ms: f64,
    /// Tight bounding box of the included samples (source space).
    pub rect: Rect,
    /// Index of the first sample after the hover.
    pub next_index: usize,
}

/// Finds hovers in a time-sorted sample slice.
#[derive(Debug, Clone)]
pub struct HoverDetector {
    box_size: f64,
    min_duration_ms: f64,
    extend_to_limit: bool,
}

impl HoverDetector {
    pub fn new(settings: &FocusSettings, source_size: Size) -> Self {
        Self {
            box_size: settings.hover_box_fraction * source_size.max_dimension(),
            min_duration_ms: settings.min_hover_duration_ms.max(0.0),
            extend_to_limit: settings.extend_hover_to_limit,
        }
    }

    /// Side of the hover box in source pixels.
    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    /// Search `samples[from..]` for the first hover whose samples all lie at
    /// or before `limit_ms`. Samples must carry output-time timestamps.
    ///
    /// With `extend_hover_to_limit`, a run that is still open when the limit
    /// is reached is treated as if the pointer stayed put until the limit,
    /// provided the last sample is no further from the limit than the
    /// allowed inter-sample gap.
    pub fn find_hover(
        &self,
        samples: &[MouseSample],
        from: usize,
        limit_ms: f64,
    ) -> Option<DetectedHover> {
        let mut run_start = from;
        let mut bbox: Option<Rect> = None;
        let mut i = from;

        while i < samples.len() && samples[i].timestamp_ms <= limit_ms {
            let sample = samples[i];
            let point_rect = Rect::new(sample.position.x, sample.position.y, 0.0, 0.0);

            let Some(current) = bbox else {
                bbox = Some(point_rect);
                i += 1;
                continue;
            };

            let gap = sample.timestamp_ms - samples[i - 1].timestamp_ms;
            let grown = current.union(&point_rect);

            if gap > self.min_duration_ms {
                if let Some(hover) = self.qualify(samples, run_start, i - 1, current) {
                    return Some(hover);
                }
                run_start = i;
                bbox = Some(point_rect);
            } else if !self.fits(&grown) {
                if let Some(hover) = self.qualify(samples, run_start, i - 1, current) {
                    return Some(hover);
                }
                // Drop leading samples until the run ending here fits again.
                let mut window = grown;
                while run_start < i && !self.fits(&window) {
                    run_start += 1;
                    window = Rect::bounding_box(samples[run_start..=i].iter().map(|s| s.position))
                        .unwrap_or(point_rect);
                }
                bbox = Some(window);
            } else {
                bbox = Some(grown);
            }
            i += 1;
        }

        let rect = bbox?;
        let last = i - 1;
        if let Some(hover) = self.qualify(samples, run_start, last, rect) {
            return Some(hover);
        }

        if self.extend_to_limit && limit_ms.is_finite() {
            let start_ms = samples[run_start].timestamp_ms;
            let parked_gap = limit_ms - samples[last].timestamp_ms;
            if parked_gap <= self.min_duration_ms && limit_ms - start_ms >= self.min_duration_ms {
                return Some(DetectedHover {
                    start_ms,
                    end_ms: limit_ms,
                    rect,
                    next_index: i,
                });
            }
        }

        None
    }

    fn fits(&self, rect: &Rect) -> bool {
        rect.width <= self.box_size && rect.height <= self.box_size
    }

    fn qualify(
        &self,
        samples: &[MouseSample],
        first: usize,
        last: usize,
        rect: Rect,
    ) -> Option<DetectedHover> {
        let start_ms = samples[first].timestamp_ms;
        let end_ms = samples[last].timestamp_ms;
        (end_ms - start_ms >= self.min_duration_ms).then_some(DetectedHover {
            start_ms,
            end_ms,
            rect,
            next_index: last + 1,
        })
    }
}
