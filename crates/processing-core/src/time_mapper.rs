//! Source ↔ output time remapping across trimmed windows.
//!
//! Output time is the clock of the final video: kept windows laid end to
//! end with the gaps between them removed. Every scheduling decision
//! downstream is made in output time so animations stay continuous across
//! cuts.

use zoomreel_project_model::window::OutputWindow;

/// A range in output time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRange {
    pub start_ms: f64,
    pub end_ms: f64,
}

impl OutputRange {
    pub fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }
}

#[derive(Debug, Clone)]
struct MappedWindow {
    start_ms: f64,
    end_ms: f64,
    /// Output time at which this window begins.
    output_offset_ms: f64,
}

impl MappedWindow {
    fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }
}

/// Maps timestamps between source and output time.
#[derive(Debug, Clone)]
pub struct TimeMapper {
    windows: Vec<MappedWindow>,
    output_duration_ms: f64,
}

impl TimeMapper {
    /// Build a mapper from kept windows. Windows are sorted by start;
    /// inverted windows count as zero-length and non-finite ones are ignored.
    pub fn new(windows: &[OutputWindow]) -> Self {
        let mut sorted: Vec<&OutputWindow> = windows
            .iter()
            .filter(|w| w.start_ms.is_finite() && w.end_ms.is_finite())
            .collect();
        sorted.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms));

        let mut offset = 0.0;
        let mut mapped = Vec::with_capacity(sorted.len());
        for w in sorted {
            let end_ms = w.end_ms.max(w.start_ms);
            mapped.push(MappedWindow {
                start_ms: w.start_ms,
                end_ms,
                output_offset_ms: offset,
            });
            offset += end_ms - w.start_ms;
        }

        Self {
            windows: mapped,
            output_duration_ms: offset,
        }
    }

    /// Sum of all window durations.
    pub fn output_duration(&self) -> f64 {
        self.output_duration_ms
    }

    /// Output time for a source timestamp, or `None` if it falls in a
    /// trimmed gap. Boundaries are inclusive; the first matching window wins.
    pub fn map_source_to_output_time(&self, source_ms: f64) -> Option<f64> {
        self.window_containing(source_ms)
            .map(|w| w.output_offset_ms + (source_ms - w.start_ms))
    }

    /// Source time for an output timestamp, valid over
    /// `[0, output_duration]` inclusive.
    pub fn map_output_to_source_time(&self, output_ms: f64) -> Option<f64> {
        if !(0.0..=self.output_duration_ms).contains(&output_ms) {
            return None;
        }
        let found = self.windows.iter().find(|w| {
            w.duration_ms() > 0.0
                && output_ms >= w.output_offset_ms
                && output_ms < w.output_offset_ms + w.duration_ms()
        });
        match found {
            Some(w) => Some(w.start_ms + (output_ms - w.output_offset_ms)),
            // Only the final boundary reaches here.
            None => self
                .windows
                .iter()
                .rev()
                .find(|w| w.duration_ms() > 0.0)
                .map(|w| w.end_ms),
        }
    }

    /// Map a source range to output time. `None` if `start_ms` is not
    /// visible; a range that runs past the end of its window is truncated
    /// at that window's end rather than split across the cut.
    pub fn map_source_range_to_output_range(
        &self,
        start_ms: f64,
        end_ms: f64,
    ) -> Option<OutputRange> {
        let w = self.window_containing(start_ms)?;
        let end_ms = end_ms.clamp(start_ms, w.end_ms);
        Some(OutputRange {
            start_ms: w.output_offset_ms + (start_ms - w.start_ms),
            end_ms: w.output_offset_ms + (end_ms - w.start_ms),
        })
    }

    fn window_containing(&self, source_ms: f64) -> Option<&MappedWindow> {
        self.windows
            .iter()
            .find(|w| source_ms >= w.start_ms && source_ms <= w.end_ms)
    }
}
