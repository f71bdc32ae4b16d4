//! Zoom scheduling: focus areas → camera motions.
//!
//! Each focus area asks for a viewport that frames its must-see rect. The
//! scheduler only emits a motion when the current viewport cannot already
//! show that rect, fits motions between their neighbours, and merges
//! targets that arrive too quickly to animate separately.

use zoomreel_project_model::focus::{FocusArea, FocusReason};
use zoomreel_project_model::geometry::Rect;
use zoomreel_project_model::motion::{MotionKind, ViewportMotion};
use zoomreel_project_model::settings::ZoomSettings;

use crate::view_mapper::ViewMapper;

/// Size change below which a new target counts as the same zoom level.
pub const SIZE_EPSILON: f64 = 0.5;

/// A mapped focus rect this close to the full source frame is a
/// deliberate full zoom-out.
const FULL_FRAME_TOLERANCE_PX: f64 = 1.0;

/// Builds the motion list for one schedule.
pub struct ZoomScheduler<'a> {
    settings: &'a ZoomSettings,
    view_mapper: &'a ViewMapper,
    output_duration_ms: f64,
    motions: Vec<ViewportMotion>,
    last_viewport: Rect,
    last_must_see: Option<Rect>,
}

impl<'a> ZoomScheduler<'a> {
    pub fn new(
        settings: &'a ZoomSettings,
        view_mapper: &'a ViewMapper,
        output_duration_ms: f64,
    ) -> Self {
        Self {
            settings,
            view_mapper,
            output_duration_ms,
            motions: vec![],
            last_viewport: view_mapper.output_frame(),
            last_must_see: None,
        }
    }

    fn max_zoom(&self) -> f64 {
        let z = self.settings.max_zoom;
        if z.is_finite() && z >= 1.0 {
            z
        } else {
            1.0
        }
    }

    /// Smallest output-aspect viewport centred on `must_see` that contains
    /// it and respects the zoom limit, kept inside the canvas.
    pub fn viewport_for(&self, must_see: &Rect) -> Rect {
        let out = self.view_mapper.output_size();
        let aspect = out.aspect_ratio();
        let max_zoom = self.max_zoom();

        let mut width = must_see.width.max(out.width / max_zoom);
        let mut height = must_see.height.max(out.height / max_zoom);
        if width / height > aspect {
            height = width / aspect;
        } else {
            width = height * aspect;
        }
        if width > out.width || height > out.height {
            let k = (out.width / width).min(out.height / height);
            width *= k;
            height *= k;
        }

        Rect::centered_at(must_see.center(), width, height)
            .clamp_preserving_size(&self.view_mapper.output_frame())
    }

    /// Feed the next focus area.
    pub fn push(&mut self, area: &FocusArea) {
        if area.timestamp_ms > self.output_duration_ms - self.settings.end_ignore_window_ms {
            tracing::trace!(at_ms = area.timestamp_ms, "ignoring focus area near end");
            return;
        }

        let frame = self.view_mapper.output_frame();
        let (must_see, target) = if area
            .rect
            .approx_eq(&self.view_mapper.input_frame(), FULL_FRAME_TOLERANCE_PX)
        {
            (frame, frame)
        } else {
            let must_see = self.view_mapper.input_to_output_rect(&area.rect);
            (must_see, self.viewport_for(&must_see))
        };

        let resized = (target.width - self.last_viewport.width).abs() > SIZE_EPSILON
            || (target.height - self.last_viewport.height).abs() > SIZE_EPSILON;
        if self.last_viewport.contains_rect(&must_see) && !resized {
            self.last_must_see = Some(match self.last_must_see {
                Some(prev) => prev.union(&must_see),
                None => must_see,
            });
            return;
        }

        let end_ms = area.timestamp_ms;
        let nominal_ms = self.settings.max_motion_duration_ms.max(0.0);
        let min_ms = self.settings.min_motion_duration_ms.max(0.0);

        let Some(prev_end_ms) = self.motions.last().map(|m| m.output_end_time_ms) else {
            let duration_ms = nominal_ms.min(end_ms.max(0.0));
            self.append(end_ms, duration_ms, target, must_see, area.reason);
            return;
        };

        if end_ms - nominal_ms >= prev_end_ms {
            self.append(end_ms, nominal_ms, target, must_see, area.reason);
            return;
        }

        let gap_ms = end_ms - prev_end_ms;
        if gap_ms >= min_ms {
            tracing::debug!(at_ms = end_ms, gap_ms, "shrinking motion to fit");
            self.append(end_ms, gap_ms, target, must_see, area.reason);
        } else {
            self.merge_into_previous(must_see, area.reason);
        }
    }

    fn append(
        &mut self,
        end_ms: f64,
        duration_ms: f64,
        viewport: Rect,
        must_see: Rect,
        reason: FocusReason,
    ) {
        self.motions.push(ViewportMotion {
            id: String::new(),
            output_end_time_ms: end_ms,
            duration_ms,
            rect: viewport,
            reason,
            kind: MotionKind::Auto,
        });
        self.last_viewport = viewport;
        self.last_must_see = Some(must_see);
    }

    /// Replace the previous motion with one viewport framing both the
    /// previous and the new must-see rects.
    fn merge_into_previous(&mut self, must_see: Rect, reason: FocusReason) {
        let union = match self.last_must_see {
            Some(prev) => prev.union(&must_see),
            None => must_see,
        };
        let viewport = self.viewport_for(&union);
        if let Some(prev) = self.motions.last_mut() {
            tracing::debug!(
                at_ms = prev.output_end_time_ms,
                ?reason,
                "merging rapid focus change into previous motion"
            );
            prev.rect = viewport;
            prev.reason = reason;
        }
        self.last_viewport = viewport;
        self.last_must_see = Some(union);
    }

    /// Close the schedule, appending a trailing zoom-out if the camera is
    /// still zoomed in.
    pub fn finish(mut self) -> Vec<ViewportMotion> {
        let frame = self.view_mapper.output_frame();
        if !self.last_viewport.approx_eq(&frame, FULL_FRAME_TOLERANCE_PX) {
            let transition_ms = self.settings.end_transition_ms.max(0.0);
            let nominal_end_ms =
                self.output_duration_ms - self.settings.end_ignore_window_ms + transition_ms;
            let prev_end_ms = self
                .motions
                .last()
                .map_or(f64::NEG_INFINITY, |m| m.output_end_time_ms);
            let start_ms = (nominal_end_ms - transition_ms).max(prev_end_ms);
            let end_ms = nominal_end_ms.max(start_ms + self.settings.min_motion_duration_ms.max(0.0));

            self.motions.push(ViewportMotion {
                id: String::new(),
                output_end_time_ms: end_ms,
                duration_ms: end_ms - start_ms,
                rect: frame,
                reason: FocusReason::EndZoomout,
                kind: MotionKind::Auto,
            });
        }

        for (i, motion) in self.motions.iter_mut().enumerate() {
            motion.id = format!("auto-zoom-{i}");
        }
        self.motions
    }
}

/// Turn focus areas into an ordered list of non-overlapping motions.
/// Returns an empty schedule when auto-zoom is disabled.
pub fn calculate_zoom_schedule(
    settings: &ZoomSettings,
    view_mapper: &ViewMapper,
    focus_areas: &[FocusArea],
    output_duration_ms: f64,
) -> Vec<ViewportMotion> {
    if !settings.auto_zoom {
        return vec![];
    }

    let mut scheduler = ZoomScheduler::new(settings, view_mapper, output_duration_ms);
    for area in focus_areas {
        scheduler.push(area);
    }
    let motions = scheduler.finish();
    tracing::debug!(
        areas = focus_areas.len(),
        motions = motions.len(),
        "zoom schedule computed"
    );
    motions
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoomreel_project_model::geometry::{Point, Size};

    fn square_mapper() -> ViewMapper {
        ViewMapper::new(Size::new(2000.0, 2000.0), Size::new(1000.0, 1000.0), 0.0)
    }

    fn click_area(t: f64, x: f64, y: f64) -> FocusArea {
        FocusArea::new(
            t,
            Rect::centered_at(Point::new(x, y), 200.0, 200.0)
                .clamp_preserving_size(&Rect::new(0.0, 0.0, 2000.0, 2000.0)),
            FocusReason::Click,
        )
    }

    fn full_area(t: f64, reason: FocusReason) -> FocusArea {
        FocusArea::new(t, Rect::new(0.0, 0.0, 2000.0, 2000.0), reason)
    }

    #[test]
    fn test_viewport_respects_max_zoom_and_aspect() {
        let mapper = ViewMapper::new(Size::new(1920.0, 1080.0), Size::new(1600.0, 900.0), 0.0);
        let settings = ZoomSettings::default();
        let scheduler = ZoomScheduler::new(&settings, &mapper, 10_000.0);

        let tiny = Rect::new(790.0, 440.0, 20.0, 20.0);
        let vp = scheduler.viewport_for(&tiny);
        assert!((vp.width - 800.0).abs() < 1e-9);
        assert!((vp.height - 450.0).abs() < 1e-9);
        assert!(vp.contains_rect(&tiny));

        let tall = Rect::new(700.0, 0.0, 100.0, 900.0);
        let vp = scheduler.viewport_for(&tall);
        assert!((vp.width / vp.height - 16.0 / 9.0).abs() < 1e-9);
        assert!(vp.contains_rect(&tall));
    }

    #[test]
    fn test_viewport_clamped_to_canvas() {
        let mapper = square_mapper();
        let settings = ZoomSettings::default();
        let scheduler = ZoomScheduler::new(&settings, &mapper, 10_000.0);
        let vp = scheduler.viewport_for(&Rect::new(950.0, 950.0, 50.0, 50.0));
        assert_eq!(vp, Rect::new(500.0, 500.0, 500.0, 500.0));
    }

    #[test]
    fn test_contained_target_is_suppressed() {
        let mapper = square_mapper();
        let areas = vec![
            click_area(2000.0, 1000.0, 1000.0),
            click_area(4000.0, 1050.0, 1050.0),
        ];
        let motions = calculate_zoom_schedule(&ZoomSettings::default(), &mapper, &areas, 20_000.0);
        // One zoom in plus the trailing zoom-out.
        assert_eq!(motions.len(), 2);
        assert_eq!(motions[0].rect, Rect::new(250.0, 250.0, 500.0, 500.0));
        assert_eq!(motions[1].reason, FocusReason::EndZoomout);
    }

    #[test]
    fn test_overlapping_motion_is_shrunk() {
        let mapper = square_mapper();
        let areas = vec![
            click_area(2000.0, 200.0, 200.0),
            click_area(2600.0, 1800.0, 1800.0),
        ];
        let motions = calculate_zoom_schedule(&ZoomSettings::default(), &mapper, &areas, 20_000.0);
        assert_eq!(motions[1].output_end_time_ms, 2600.0);
        assert_eq!(motions[1].duration_ms, 600.0);
        assert_eq!(motions[1].output_start_time_ms(), motions[0].output_end_time_ms);
    }

    #[test]
    fn test_rapid_targets_are_merged() {
        let mapper = square_mapper();
        let areas = vec![
            click_area(2000.0, 600.0, 600.0),
            click_area(2100.0, 1100.0, 1100.0),
        ];
        let motions = calculate_zoom_schedule(&ZoomSettings::default(), &mapper, &areas, 20_000.0);
        assert_eq!(motions.len(), 2);
        let merged = &motions[0];
        assert_eq!(merged.output_end_time_ms, 2000.0);
        // Both clicks must be visible in the merged viewport.
        assert!(merged.rect.contains_rect(&Rect::new(250.0, 250.0, 100.0, 100.0)));
        assert!(merged.rect.contains_rect(&Rect::new(500.0, 500.0, 100.0, 100.0)));
    }

    #[test]
    fn test_full_frame_area_zooms_out() {
        let mapper = square_mapper();
        let areas = vec![
            click_area(2000.0, 1000.0, 1000.0),
            full_area(6000.0, FocusReason::Inactivity),
            full_area(9000.0, FocusReason::FinalZoomout),
        ];
        let motions = calculate_zoom_schedule(&ZoomSettings::default(), &mapper, &areas, 20_000.0);
        assert_eq!(motions.len(), 2);
        assert_eq!(motions[1].rect, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        assert_eq!(motions[1].reason, FocusReason::Inactivity);
    }

    #[test]
    fn test_end_zoomout_timing() {
        let mapper = square_mapper();
        let areas = vec![click_area(5000.0, 1000.0, 1000.0)];
        let motions = calculate_zoom_schedule(&ZoomSettings::default(), &mapper, &areas, 10_000.0);
        let last = motions.last().unwrap();
        assert_eq!(last.reason, FocusReason::EndZoomout);
        assert_eq!(last.output_end_time_ms, 9800.0);
        assert_eq!(last.duration_ms, 800.0);
        assert_eq!(last.id, "auto-zoom-1");
    }

    #[test]
    fn test_areas_near_end_are_ignored() {
        let mapper = square_mapper();
        let areas = vec![click_area(9500.0, 1000.0, 1000.0)];
        let motions = calculate_zoom_schedule(&ZoomSettings::default(), &mapper, &areas, 10_000.0);
        assert!(motions.is_empty());
    }

    #[test]
    fn test_first_motion_does_not_start_before_zero() {
        let mapper = square_mapper();
        let areas = vec![click_area(600.0, 1000.0, 1000.0)];
        let motions = calculate_zoom_schedule(&ZoomSettings::default(), &mapper, &areas, 10_000.0);
        assert_eq!(motions[0].output_start_time_ms(), 0.0);
    }

    #[test]
    fn test_auto_zoom_disabled() {
        let mapper = square_mapper();
        let settings = ZoomSettings {
            auto_zoom: false,
            ..Default::default()
        };
        let areas = vec![click_area(2000.0, 1000.0, 1000.0)];
        assert!(calculate_zoom_schedule(&settings, &mapper, &areas, 10_000.0).is_empty());
    }
}
