//! End-to-end schedule computation for one project.
//!
//! Focus areas, motions and spotlights are always recomputed together from
//! the project's events, windows and settings. Callers swap the whole
//! [`DirectorOutput`] in at once instead of patching an old schedule.

use zoomreel_project_model::focus::FocusArea;
use zoomreel_project_model::geometry::{Rect, Size};
use zoomreel_project_model::motion::{Spotlight, ViewportMotion};
use zoomreel_project_model::project::{Schedule, ZoomProject};

use crate::focus_manager::get_all_focus_areas;
use crate::spotlight::calculate_auto_spotlights;
use crate::time_mapper::TimeMapper;
use crate::view_mapper::ViewMapper;
use crate::viewport_state::get_viewport_state_at_time;
use crate::zoom_schedule::calculate_zoom_schedule;

/// Everything the renderer needs for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorOutput {
    pub output_duration_ms: f64,
    pub output_size: Size,
    pub focus_areas: Vec<FocusArea>,
    pub motions: Vec<ViewportMotion>,
    pub spotlights: Vec<Spotlight>,
}

impl DirectorOutput {
    /// Camera viewport at an output time.
    pub fn viewport_at(&self, t_ms: f64) -> Rect {
        get_viewport_state_at_time(&self.motions, t_ms, self.output_size)
    }

    /// Spotlights active at an output time.
    pub fn spotlights_at(&self, t_ms: f64) -> impl Iterator<Item = &Spotlight> {
        self.spotlights
            .iter()
            .filter(move |s| t_ms >= s.output_start_time_ms && t_ms <= s.output_end_time_ms)
    }

    /// Wrap into a persisted schedule document.
    pub fn into_schedule(self) -> Schedule {
        Schedule::new(
            self.output_duration_ms,
            self.focus_areas,
            self.motions,
            self.spotlights,
        )
    }
}

/// Runs focus detection, zoom scheduling and spotlight placement.
pub struct Director;

impl Director {
    pub fn run(project: &ZoomProject) -> DirectorOutput {
        let time_mapper = TimeMapper::new(&project.windows);
        let view_mapper = ViewMapper::new(project.source_size, project.output_size, project.padding);
        let streams = project.event_streams();
        let settings = &project.settings;
        let output_duration_ms = time_mapper.output_duration();

        let focus_areas = get_all_focus_areas(
            &streams,
            &time_mapper,
            project.source_size,
            &settings.focus,
        );
        let motions =
            calculate_zoom_schedule(&settings.zoom, &view_mapper, &focus_areas, output_duration_ms);
        let spotlights = calculate_auto_spotlights(
            &view_mapper,
            &time_mapper,
            streams.hovered_cards(),
            &motions,
            &settings.spotlight,
        );

        tracing::info!(
            project = %project.name,
            output_duration_ms,
            focus_areas = focus_areas.len(),
            motions = motions.len(),
            spotlights = spotlights.len(),
            "director run complete"
        );

        DirectorOutput {
            output_duration_ms,
            output_size: project.output_size,
            focus_areas,
            motions,
            spotlights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoomreel_project_model::event::InputEvent;
    use zoomreel_project_model::focus::FocusReason;

    fn project() -> ZoomProject {
        let mut project = ZoomProject::new(
            "demo",
            Size::new(2000.0, 2000.0),
            Size::new(1000.0, 1000.0),
            20_000.0,
        );
        project.events = vec![
            InputEvent::click(2000.0, 1000.0, 1000.0),
            InputEvent::hovered_card(
                3000.0,
                6000.0,
                Rect::new(900.0, 900.0, 200.0, 200.0),
                [8.0; 4],
            ),
        ];
        project
    }

    #[test]
    fn test_run_produces_complete_output() {
        let out = Director::run(&project());
        assert_eq!(out.output_duration_ms, 20_000.0);
        assert!(!out.focus_areas.is_empty());
        assert_eq!(out.motions[0].reason, FocusReason::Click);
        assert_eq!(out.spotlights.len(), 1);
        assert_eq!(out.spotlights_at(4000.0).count(), 1);
        assert_eq!(out.spotlights_at(9000.0).count(), 0);
    }

    #[test]
    fn test_viewport_at_follows_motions() {
        let out = Director::run(&project());
        assert_eq!(out.viewport_at(0.0), Rect::new(0.0, 0.0, 1000.0, 1000.0));
        assert_eq!(out.viewport_at(2500.0), out.motions[0].rect);
    }

    #[test]
    fn test_into_schedule_keeps_everything() {
        let out = Director::run(&project());
        let motions = out.motions.clone();
        let schedule = out.into_schedule();
        assert_eq!(schedule.motions, motions);
        assert_eq!(schedule.output_duration_ms, 20_000.0);
        assert!(!schedule.generated_at.is_empty());
    }
}
