//! Policy settings for the auto-director.
//!
//! Every threshold the scheduler uses lives here so projects can tune them.
//! Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// All scheduling settings for one project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorSettings {
    pub focus: FocusSettings,
    pub zoom: ZoomSettings,
    pub spotlight: SpotlightSettings,
}

/// Focus detection and filtering thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    /// Hover box side as a fraction of the source's larger dimension.
    pub hover_box_fraction: f64,

    /// Minimum time the pointer must stay inside the hover box. Also the
    /// largest inter-sample gap a hover tolerates.
    pub min_hover_duration_ms: f64,

    /// Extend a hover that ends shortly before the search limit up to that
    /// limit, as if the pointer were parked.
    pub extend_hover_to_limit: bool,

    /// Side of the box framed around a pointer position when an event
    /// carries no element bounds (source pixels).
    pub event_box_size: f64,

    /// Targets starting before this output time are ignored...
    pub start_buffer_ms: f64,

    /// ...unless they last past this output time, in which case they are
    /// clamped to start at `start_buffer_ms`.
    pub extended_start_threshold_ms: f64,

    /// Targets inside the final stretch of this length are dropped.
    pub end_buffer_ms: f64,

    /// Targets inside the final stretch of this length are dropped and
    /// bring the trailing zoom-out forward to their start.
    pub end_trigger_zone_ms: f64,

    /// Gap without activity after which the camera zooms out.
    pub inactivity_threshold_ms: f64,

    /// Delay after the last activity before the inactivity zoom-out lands.
    pub inactivity_zoomout_delay_ms: f64,

    /// How far before the end of a long target the cursor resumes.
    pub duration_preroll_ms: f64,

    /// Hovered cards with less visible output time than this are ignored.
    pub min_hovered_card_ms: f64,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            hover_box_fraction: 0.1,
            min_hover_duration_ms: 1000.0,
            extend_hover_to_limit: true,
            event_box_size: 200.0,
            start_buffer_ms: 500.0,
            extended_start_threshold_ms: 1500.0,
            end_buffer_ms: 1000.0,
            end_trigger_zone_ms: 3000.0,
            inactivity_threshold_ms: 5000.0,
            inactivity_zoomout_delay_ms: 2000.0,
            duration_preroll_ms: 300.0,
            min_hovered_card_ms: 1500.0,
        }
    }
}

/// Camera motion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    /// Generate camera motions automatically.
    pub auto_zoom: bool,

    /// Largest magnification; the viewport is never smaller than
    /// `output_size / max_zoom`.
    pub max_zoom: f64,

    /// Shortest motion the scheduler will squeeze in before merging.
    pub min_motion_duration_ms: f64,

    /// Nominal motion length.
    pub max_motion_duration_ms: f64,

    /// Focus areas inside the final stretch of this length are ignored.
    pub end_ignore_window_ms: f64,

    /// Length of the trailing zoom-out motion.
    pub end_transition_ms: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            auto_zoom: true,
            max_zoom: 2.0,
            min_motion_duration_ms: 400.0,
            max_motion_duration_ms: 1000.0,
            end_ignore_window_ms: 1000.0,
            end_transition_ms: 800.0,
        }
    }
}

/// Spotlight overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightSettings {
    pub enabled: bool,

    /// Opacity of the dimmed background in `[0.0, 1.0]`. Renderer-only.
    pub dim_opacity: f64,

    /// Requested enlargement of the highlighted element.
    pub enlarge_scale: f64,

    /// Fade in/out duration. Renderer-only.
    pub transition_ms: f64,

    /// Minimum visible output duration of a spotlight.
    pub min_duration_ms: f64,

    /// Gap kept between an enlarged element and the viewport edge (output
    /// pixels).
    pub safety_margin_px: f64,
}

impl Default for SpotlightSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dim_opacity: 0.5,
            enlarge_scale: 1.2,
            transition_ms: 300.0,
            min_duration_ms: 1500.0,
            safety_margin_px: 8.0,
        }
    }
}

impl DirectorSettings {
    /// Human-readable problems with the settings. The scheduler tolerates
    /// all of them, but the results are unlikely to be what was meant.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = vec![];
        let zoom = &self.zoom;
        if zoom.max_zoom.is_nan() || zoom.max_zoom < 1.0 {
            issues.push(format!("zoom.max_zoom must be >= 1.0, got {}", zoom.max_zoom));
        }
        if zoom.min_motion_duration_ms < 0.0 {
            issues.push("zoom.min_motion_duration_ms must not be negative".to_string());
        }
        if zoom.max_motion_duration_ms < zoom.min_motion_duration_ms {
            issues.push(format!(
                "zoom.max_motion_duration_ms ({}) is below min_motion_duration_ms ({})",
                zoom.max_motion_duration_ms, zoom.min_motion_duration_ms
            ));
        }

        let focus = &self.focus;
        if focus.hover_box_fraction.is_nan()
            || focus.hover_box_fraction <= 0.0
            || focus.hover_box_fraction > 1.0
        {
            issues.push(format!(
                "focus.hover_box_fraction must be in (0, 1], got {}",
                focus.hover_box_fraction
            ));
        }
        if focus.end_trigger_zone_ms < focus.end_buffer_ms {
            issues.push("focus.end_trigger_zone_ms is narrower than end_buffer_ms".to_string());
        }
        if focus.inactivity_zoomout_delay_ms >= focus.inactivity_threshold_ms {
            issues.push(
                "focus.inactivity_zoomout_delay_ms should be below inactivity_threshold_ms"
                    .to_string(),
            );
        }

        if self.spotlight.enlarge_scale < 1.0 {
            issues.push(format!(
                "spotlight.enlarge_scale must be >= 1.0, got {}",
                self.spotlight.enlarge_scale
            ));
        }
        issues
    }
}
