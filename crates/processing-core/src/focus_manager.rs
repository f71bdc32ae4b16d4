//! Focus detection: turns categorized input events into an ordered
//! sequence of focus areas.
//!
//! # Algorithm
//!
//! The [`FocusManager`] is a resumable generator over output time. Each
//! step it:
//!
//! 1. Returns a target deferred by the previous step's inactivity check.
//! 2. Peeks the next explicit event at or after its cursor, remapped to
//!    output time. Events in trimmed gaps and too-short hovered cards are
//!    dropped for good.
//! 3. Searches the pointer stream up to that event for a hover.
//! 4. Takes whichever of hover / event starts first (hover on ties).
//! 5. Applies the start buffer, end buffer and end trigger zone.
//! 6. Inserts a full-frame `Inactivity` area before targets that follow a
//!    long quiet stretch.
//! 7. Returns the target's area and moves the cursor past it.
//!
//! Once both streams are exhausted a single full-frame `FinalZoomout` area
//! is emitted.

use zoomreel_project_model::event::{EventKind, EventStreams, InputEvent, MouseSample};
use zoomreel_project_model::focus::{FocusArea, FocusReason};
use zoomreel_project_model::geometry::{Point, Rect, Size};
use zoomreel_project_model::settings::FocusSettings;

use crate::hover::HoverDetector;
use crate::time_mapper::TimeMapper;

/// Snapshot of the generator's cursors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusProgress {
    /// Output time up to which input has been consumed.
    pub cursor_ms: f64,
    /// Index of the next unconsumed explicit event.
    pub event_index: usize,
    /// Index of the next unconsumed (visible) pointer sample.
    pub sample_index: usize,
}

/// A candidate focus in output time.
#[derive(Debug, Clone, Copy)]
struct Target {
    start_ms: f64,
    end_ms: Option<f64>,
    rect: Rect,
    reason: FocusReason,
    origin: TargetOrigin,
}

#[derive(Debug, Clone, Copy)]
enum TargetOrigin {
    Event,
    Hover { next_sample: usize },
}

/// Resumable focus-area generator.
pub struct FocusManager<'a> {
    settings: FocusSettings,
    time_mapper: &'a TimeMapper,
    events: &'a [InputEvent],
    /// Visible pointer samples, timestamps already in output time.
    samples: Vec<MouseSample>,
    hover_detector: HoverDetector,
    source_frame: Rect,
    output_duration_ms: f64,

    cursor_ms: f64,
    event_index: usize,
    sample_index: usize,
    deferred: Option<FocusArea>,
    final_zoomout_ms: f64,
    last_emitted_ms: f64,
    final_emitted: bool,
}

impl<'a> FocusManager<'a> {
    pub fn new(
        streams: &'a EventStreams,
        time_mapper: &'a TimeMapper,
        source_size: Size,
        settings: &FocusSettings,
    ) -> Self {
        let samples: Vec<MouseSample> = streams
            .mouse_positions
            .iter()
            .filter_map(|s| {
                time_mapper
                    .map_source_to_output_time(s.timestamp_ms)
                    .map(|t| MouseSample {
                        timestamp_ms: t,
                        position: s.position,
                    })
            })
            .collect();

        let output_duration_ms = time_mapper.output_duration();
        Self {
            settings: settings.clone(),
            time_mapper,
            events: &streams.interactions,
            samples,
            hover_detector: HoverDetector::new(settings, source_size),
            source_frame: Rect::from_size(source_size),
            output_duration_ms,
            cursor_ms: 0.0,
            event_index: 0,
            sample_index: 0,
            deferred: None,
            final_zoomout_ms: output_duration_ms - settings.end_buffer_ms,
            last_emitted_ms: 0.0,
            final_emitted: false,
        }
    }

    pub fn progress(&self) -> FocusProgress {
        FocusProgress {
            cursor_ms: self.cursor_ms,
            event_index: self.event_index,
            sample_index: self.sample_index,
        }
    }

    /// Advance to the next focus area, or `None` when exhausted.
    pub fn next_focus_area(&mut self) -> Option<FocusArea> {
        if let Some(area) = self.deferred.take() {
            return Some(self.record(area));
        }

        loop {
            let event = self.peek_event();
            let limit_ms = event.map_or(f64::INFINITY, |e| e.start_ms);

            self.skip_samples_before_cursor();
            let hover = self
                .hover_detector
                .find_hover(&self.samples, self.sample_index, limit_ms)
                .map(|h| Target {
                    start_ms: h.start_ms,
                    end_ms: Some(h.end_ms),
                    rect: h.rect,
                    reason: FocusReason::Hover,
                    origin: TargetOrigin::Hover {
                        next_sample: h.next_index,
                    },
                });

            let target = match (hover, event) {
                (Some(h), Some(e)) if h.start_ms <= e.start_ms => h,
                (_, Some(e)) => e,
                (Some(h), None) => h,
                (None, None) => return self.finish(),
            };
            self.consume(&target);

            if let Some(target) = self.apply_buffers(target) {
                return Some(self.emit(target));
            }
        }
    }

    /// Next explicit event at or after the cursor, remapped to output time.
    /// Unusable events are consumed along the way.
    fn peek_event(&mut self) -> Option<Target> {
        let events = self.events;
        while let Some(event) = events.get(self.event_index) {
            match self.event_target(event) {
                Some(target) if target.start_ms >= self.cursor_ms => return Some(target),
                Some(target) => {
                    tracing::trace!(
                        kind = event.kind_name(),
                        start_ms = target.start_ms,
                        cursor_ms = self.cursor_ms,
                        "dropping event overtaken by cursor"
                    );
                }
                None => {
                    tracing::trace!(
                        kind = event.kind_name(),
                        source_ms = event.timestamp_ms,
                        "dropping event outside kept windows or too short"
                    );
                }
            }
            self.event_index += 1;
        }
        None
    }

    fn event_target(&self, event: &InputEvent) -> Option<Target> {
        let (start_ms, end_ms) = match event.end_time_ms() {
            Some(end) => {
                let range = self
                    .time_mapper
                    .map_source_range_to_output_range(event.timestamp_ms, end)?;
                (range.start_ms, Some(range.end_ms))
            }
            None => (
                self.time_mapper
                    .map_source_to_output_time(event.timestamp_ms)?,
                None,
            ),
        };

        let mouse_box = |p: Point| {
            Rect::centered_at(p, self.settings.event_box_size, self.settings.event_box_size)
        };

        let (rect, reason) = match &event.kind {
            EventKind::Click { target_rect } => (
                target_rect.unwrap_or_else(|| mouse_box(event.mouse)),
                FocusReason::Click,
            ),
            EventKind::Keydown { target_rect, .. } => (
                target_rect.unwrap_or_else(|| mouse_box(event.mouse)),
                FocusReason::Keydown,
            ),
            EventKind::Scroll { target_rect, .. } => (
                target_rect.unwrap_or_else(|| mouse_box(event.mouse)),
                FocusReason::Scroll,
            ),
            EventKind::Typing { target_rect, .. } => (
                target_rect.unwrap_or_else(|| mouse_box(event.mouse)),
                FocusReason::Typing,
            ),
            EventKind::Drag { end_position, .. } => (
                mouse_box(event.mouse).union(&mouse_box(*end_position)),
                FocusReason::Drag,
            ),
            EventKind::UrlChange { .. } => (self.source_frame, FocusReason::UrlChange),
            EventKind::HoveredCard { target_rect, .. } => {
                let visible_ms = end_ms.map_or(0.0, |end| end - start_ms);
                if visible_ms < self.settings.min_hovered_card_ms {
                    return None;
                }
                (*target_rect, FocusReason::HoveredCard)
            }
            EventKind::Hover { rect, .. } => (*rect, FocusReason::Hover),
            EventKind::MousePosition => return None,
        };

        Some(Target {
            start_ms,
            end_ms,
            rect,
            reason,
            origin: TargetOrigin::Event,
        })
    }

    fn skip_samples_before_cursor(&mut self) {
        while self
            .samples
            .get(self.sample_index)
            .is_some_and(|s| s.timestamp_ms < self.cursor_ms)
        {
            self.sample_index += 1;
        }
    }

    fn consume(&mut self, target: &Target) {
        match target.origin {
            TargetOrigin::Event => self.event_index += 1,
            TargetOrigin::Hover { next_sample } => {
                self.sample_index = self.sample_index.max(next_sample)
            }
        }
    }

    /// Start buffer, end buffer and trigger zone. `None` drops the target.
    fn apply_buffers(&mut self, mut target: Target) -> Option<Target> {
        let s = &self.settings;

        if target.start_ms < s.start_buffer_ms {
            match target.end_ms {
                Some(end) if end > s.extended_start_threshold_ms => {
                    target.start_ms = s.start_buffer_ms;
                }
                _ => {
                    tracing::trace!(start_ms = target.start_ms, "dropping target in start buffer");
                    return None;
                }
            }
        }

        if target.start_ms >= self.output_duration_ms - s.end_buffer_ms {
            tracing::trace!(start_ms = target.start_ms, "dropping target in end buffer");
            return None;
        }

        if target.start_ms >= self.output_duration_ms - s.end_trigger_zone_ms {
            tracing::trace!(
                start_ms = target.start_ms,
                "target in end trigger zone, zooming out early"
            );
            self.final_zoomout_ms = self.final_zoomout_ms.min(target.start_ms);
            return None;
        }

        Some(target)
    }

    fn emit(&mut self, target: Target) -> FocusArea {
        let area = FocusArea::new(
            target.start_ms,
            target.rect.clamp_preserving_size(&self.source_frame),
            target.reason,
        );
        let gap_ms = target.start_ms - self.cursor_ms;
        let quiet_since_ms = self.cursor_ms;

        self.cursor_ms = match target.end_ms {
            Some(end) => (end - self.settings.duration_preroll_ms).max(target.start_ms),
            None => target.start_ms,
        };

        self.with_inactivity_check(area, gap_ms, quiet_since_ms)
    }

    fn finish(&mut self) -> Option<FocusArea> {
        if self.final_emitted || self.output_duration_ms <= 0.0 {
            return None;
        }
        self.final_emitted = true;

        let at_ms = self
            .final_zoomout_ms
            .min(self.output_duration_ms)
            .max(self.last_emitted_ms)
            .max(0.0);
        let area = FocusArea::new(at_ms, self.source_frame, FocusReason::FinalZoomout);
        let gap_ms = at_ms - self.cursor_ms;
        let quiet_since_ms = self.cursor_ms;
        self.cursor_ms = self.cursor_ms.max(at_ms);

        Some(self.with_inactivity_check(area, gap_ms, quiet_since_ms))
    }

    /// Either returns `area`, or stashes it and returns an inactivity
    /// zoom-out placed shortly after the quiet stretch began.
    fn with_inactivity_check(
        &mut self,
        area: FocusArea,
        gap_ms: f64,
        quiet_since_ms: f64,
    ) -> FocusArea {
        if gap_ms < self.settings.inactivity_threshold_ms {
            return self.record(area);
        }
        let at_ms = (quiet_since_ms + self.settings.inactivity_zoomout_delay_ms)
            .min(area.timestamp_ms)
            .max(self.last_emitted_ms);
        self.deferred = Some(area);
        self.record(FocusArea::new(
            at_ms,
            self.source_frame,
            FocusReason::Inactivity,
        ))
    }

    fn record(&mut self, area: FocusArea) -> FocusArea {
        self.last_emitted_ms = self.last_emitted_ms.max(area.timestamp_ms);
        area
    }
}

impl Iterator for FocusManager<'_> {
    type Item = FocusArea;

    fn next(&mut self) -> Option<FocusArea> {
        self.next_focus_area()
    }
}

/// Compute every focus area for a recording.
pub fn get_all_focus_areas(
    streams: &EventStreams,
    time_mapper: &TimeMapper,
    source_size: Size,
    settings: &FocusSettings,
) -> Vec<FocusArea> {
    let areas: Vec<FocusArea> =
        FocusManager::new(streams, time_mapper, source_size, settings).collect();
    tracing::debug!(
        events = streams.interactions.len(),
        samples = streams.mouse_positions.len(),
        areas = areas.len(),
        "focus areas computed"
    );
    areas
}
