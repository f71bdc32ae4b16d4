//! Spotlight scheduling for long-dwell UI cards.
//!
//! A spotlight enlarges one element and dims the rest of the frame. It is
//! only emitted when the element stays fully inside the camera viewport for
//! the whole spotlight, and its enlargement is capped so it never spills
//! past any viewport the camera passes through.

use zoomreel_project_model::event::{EventKind, InputEvent};
use zoomreel_project_model::focus::FocusReason;
use zoomreel_project_model::geometry::Rect;
use zoomreel_project_model::motion::{Spotlight, ViewportMotion};
use zoomreel_project_model::settings::SpotlightSettings;

use crate::time_mapper::TimeMapper;
use crate::view_mapper::ViewMapper;
use crate::viewport_state::get_viewport_state_at_time;

/// Output times at which the viewport must be checked for a spotlight
/// over `[start_ms, end_ms]`.
fn sample_times(motions: &[ViewportMotion], start_ms: f64, end_ms: f64) -> Vec<f64> {
    let mut times = vec![start_ms, end_ms];
    for motion in motions {
        for boundary in [motion.output_start_time_ms(), motion.output_end_time_ms] {
            if boundary > start_ms && boundary < end_ms {
                times.push(boundary);
            }
        }
    }
    times.sort_by(f64::total_cmp);
    times.dedup();
    times
}

/// Largest scale about `rect`'s centre that keeps it inside `bounds`.
fn max_scale_within(rect: &Rect, bounds: &Rect) -> f64 {
    let center = rect.center();
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;

    let mut scale = f64::INFINITY;
    if half_w > 0.0 {
        scale = scale
            .min((center.x - bounds.x) / half_w)
            .min((bounds.right() - center.x) / half_w);
    }
    if half_h > 0.0 {
        scale = scale
            .min((center.y - bounds.y) / half_h)
            .min((bounds.bottom() - center.y) / half_h);
    }
    scale
}

/// Derive spotlights from hovered-card events. Other event kinds are
/// ignored. Returns an empty list when spotlights are disabled.
pub fn calculate_auto_spotlights<'e, I>(
    view_mapper: &ViewMapper,
    time_mapper: &TimeMapper,
    hovered_cards: I,
    motions: &[ViewportMotion],
    settings: &SpotlightSettings,
) -> Vec<Spotlight>
where
    I: IntoIterator<Item = &'e InputEvent>,
{
    if !settings.enabled {
        return vec![];
    }

    let output_size = view_mapper.output_size();
    let mut spotlights = vec![];

    for event in hovered_cards {
        let (end_time_ms, target_rect, corner_radius) = match &event.kind {
            EventKind::HoveredCard {
                end_time_ms,
                target_rect,
                corner_radius,
            } => (*end_time_ms, *target_rect, *corner_radius),
            EventKind::Click { .. }
            | EventKind::MousePosition
            | EventKind::Keydown { .. }
            | EventKind::Drag { .. }
            | EventKind::Scroll { .. }
            | EventKind::Typing { .. }
            | EventKind::UrlChange { .. }
            | EventKind::Hover { .. } => continue,
        };

        let Some(range) =
            time_mapper.map_source_range_to_output_range(event.timestamp_ms, end_time_ms)
        else {
            tracing::trace!(at_ms = event.timestamp_ms, "hovered card not visible");
            continue;
        };
        if range.duration_ms() < settings.min_duration_ms {
            tracing::trace!(
                at_ms = range.start_ms,
                duration_ms = range.duration_ms(),
                "hovered card too short for a spotlight"
            );
            continue;
        }

        let output_rect = view_mapper.input_to_output_rect(&target_rect);
        let viewports: Vec<Rect> = sample_times(motions, range.start_ms, range.end_ms)
            .into_iter()
            .map(|t| get_viewport_state_at_time(motions, t, output_size))
            .collect();

        if let Some(vp) = viewports.iter().find(|vp| !vp.contains_rect(&output_rect)) {
            tracing::debug!(
                at_ms = range.start_ms,
                ?output_rect,
                viewport = ?vp,
                "rejecting spotlight: card leaves the viewport"
            );
            continue;
        }

        let Some(common) = viewports
            .iter()
            .skip(1)
            .try_fold(viewports[0], |acc, vp| acc.intersection(vp))
        else {
            continue;
        };

        let safe = common.enlarge(-settings.safety_margin_px.max(0.0));
        let max_safe = max_scale_within(&output_rect, &safe);
        let scale = settings.enlarge_scale.min(max_safe).max(1.0);

        let factor = view_mapper.scale();
        spotlights.push(Spotlight {
            id: format!("spotlight-{}", spotlights.len()),
            output_start_time_ms: range.start_ms,
            output_end_time_ms: range.end_ms,
            source_rect: target_rect,
            output_rect,
            border_radius: corner_radius.map(|r| r * factor),
            scale,
            reason: FocusReason::HoveredCard,
        });
    }

    tracing::debug!(spotlights = spotlights.len(), "spotlights computed");
    spotlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoomreel_project_model::geometry::Size;
    use zoomreel_project_model::motion::MotionKind;
    use zoomreel_project_model::window::OutputWindow;

    fn mapper() -> ViewMapper {
        ViewMapper::new(Size::new(2000.0, 2000.0), Size::new(1000.0, 1000.0), 0.0)
    }

    fn timeline() -> TimeMapper {
        TimeMapper::new(&[
            OutputWindow::new("a", 0.0, 10_000.0),
            OutputWindow::new("b", 20_000.0, 30_000.0),
        ])
    }

    fn card(start: f64, end: f64, rect: Rect) -> InputEvent {
        InputEvent::hovered_card(start, end, rect, [16.0; 4])
    }

    fn zoom(end_ms: f64, duration_ms: f64, rect: Rect) -> ViewportMotion {
        ViewportMotion {
            id: "z".to_string(),
            output_end_time_ms: end_ms,
            duration_ms,
            rect,
            reason: FocusReason::Click,
            kind: MotionKind::Auto,
        }
    }

    #[test]
    fn test_card_in_full_frame_is_spotlighted() {
        let cards = vec![card(2000.0, 5000.0, Rect::new(800.0, 800.0, 400.0, 200.0))];
        let spots = calculate_auto_spotlights(
            &mapper(),
            &timeline(),
            &cards,
            &[],
            &SpotlightSettings::default(),
        );
        assert_eq!(spots.len(), 1);
        let spot = &spots[0];
        assert_eq!(spot.id, "spotlight-0");
        assert_eq!(spot.output_start_time_ms, 2000.0);
        assert_eq!(spot.output_end_time_ms, 5000.0);
        assert_eq!(spot.output_rect, Rect::new(400.0, 400.0, 200.0, 100.0));
        assert_eq!(spot.source_rect, Rect::new(800.0, 800.0, 400.0, 200.0));
        assert_eq!(spot.border_radius, [8.0; 4]);
        assert_eq!(spot.scale, 1.2);
        assert_eq!(spot.reason, FocusReason::HoveredCard);
    }

    #[test]
    fn test_card_outside_viewport_is_rejected() {
        let motions = vec![zoom(1000.0, 1000.0, Rect::new(0.0, 0.0, 500.0, 500.0))];
        let cards = vec![card(2000.0, 5000.0, Rect::new(1200.0, 1200.0, 200.0, 200.0))];
        let spots = calculate_auto_spotlights(
            &mapper(),
            &timeline(),
            &cards,
            &motions,
            &SpotlightSettings::default(),
        );
        assert!(spots.is_empty());
    }

    #[test]
    fn test_camera_leaving_card_mid_range_rejects_it() {
        let motions = vec![zoom(3000.0, 500.0, Rect::new(500.0, 500.0, 500.0, 500.0))];
        let cards = vec![card(2000.0, 5000.0, Rect::new(200.0, 200.0, 200.0, 200.0))];
        let spots = calculate_auto_spotlights(
            &mapper(),
            &timeline(),
            &cards,
            &motions,
            &SpotlightSettings::default(),
        );
        assert!(spots.is_empty());
    }

    #[test]
    fn test_scale_capped_near_viewport_edge() {
        // Output rect (2, 400, 100, 100): only 44px of room on the left.
        let cards = vec![card(2000.0, 5000.0, Rect::new(4.0, 800.0, 200.0, 200.0))];
        let spots = calculate_auto_spotlights(
            &mapper(),
            &timeline(),
            &cards,
            &[],
            &SpotlightSettings::default(),
        );
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].scale, 1.0);
    }

    #[test]
    fn test_scale_limited_by_safe_area() {
        // Output rect (18, 400, 100, 100): centre at 68, 60px of room past
        // the margin on the left.
        let cards = vec![card(2000.0, 5000.0, Rect::new(36.0, 800.0, 200.0, 200.0))];
        let settings = SpotlightSettings {
            enlarge_scale: 2.0,
            safety_margin_px: 8.0,
            ..Default::default()
        };
        let spots = calculate_auto_spotlights(&mapper(), &timeline(), &cards, &[], &settings);
        assert!((spots[0].scale - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_short_or_hidden_cards_dropped() {
        let cards = vec![
            card(2000.0, 3000.0, Rect::new(800.0, 800.0, 200.0, 200.0)),
            card(12_000.0, 18_000.0, Rect::new(800.0, 800.0, 200.0, 200.0)),
            // Straddles the cut: truncated to 9000..10000.
            card(9000.0, 25_000.0, Rect::new(800.0, 800.0, 200.0, 200.0)),
        ];
        let spots = calculate_auto_spotlights(
            &mapper(),
            &timeline(),
            &cards,
            &[],
            &SpotlightSettings::default(),
        );
        assert!(spots.is_empty());
    }

    #[test]
    fn test_other_kinds_and_disabled() {
        let events = vec![
            InputEvent::click(2000.0, 100.0, 100.0),
            card(21_000.0, 25_000.0, Rect::new(800.0, 800.0, 200.0, 200.0)),
        ];
        let spots = calculate_auto_spotlights(
            &mapper(),
            &timeline(),
            &events,
            &[],
            &SpotlightSettings::default(),
        );
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].output_start_time_ms, 11_000.0);

        let disabled = SpotlightSettings {
            enabled: false,
            ..Default::default()
        };
        assert!(calculate_auto_spotlights(&mapper(), &timeline(), &events, &[], &disabled)
            .is_empty());
    }
}
