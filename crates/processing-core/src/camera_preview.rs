//! Camera motion preview helpers.
//!
//! Generates CSS-like transform samples so UI clients can preview camera
//! movement without running the renderer.

use serde::Serialize;

use crate::director::DirectorOutput;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraMotionFrame {
    pub time_ms: f64,
    pub translate_x_percent: f64,
    pub translate_y_percent: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Number of spotlights visible in this frame.
    pub spotlights: usize,
}

impl CameraMotionFrame {
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.3}%, {:.3}%) scale({:.4}, {:.4})",
            self.translate_x_percent, self.translate_y_percent, self.scale_x, self.scale_y
        )
    }
}

/// Sample camera transforms over the whole output at `sample_rate_fps`.
pub fn simulate_camera_motion(output: &DirectorOutput, sample_rate_fps: f64) -> Vec<CameraMotionFrame> {
    let sample_rate_fps = if sample_rate_fps.is_finite() {
        sample_rate_fps.max(1.0)
    } else {
        1.0
    };
    let step_ms = 1000.0 / sample_rate_fps;
    let duration_ms = output.output_duration_ms.max(0.0);
    let canvas = output.output_size;
    let mut frames = Vec::new();

    let mut i = 0u64;
    loop {
        let t = i as f64 * step_ms;
        if t > duration_ms + f64::EPSILON {
            break;
        }
        let viewport = output.viewport_at(t);

        let scale_x = canvas.width / viewport.width.max(0.01);
        let scale_y = canvas.height / viewport.height.max(0.01);
        let translate_x_percent = -viewport.x / canvas.width.max(0.01) * 100.0;
        let translate_y_percent = -viewport.y / canvas.height.max(0.01) * 100.0;

        frames.push(CameraMotionFrame {
            time_ms: t,
            translate_x_percent,
            translate_y_percent,
            scale_x,
            scale_y,
            spotlights: output.spotlights_at(t).count(),
        });
        i += 1;
    }

    frames
}

#[cfg(test)]
mod tests {
    use zoomreel_project_model::focus::FocusReason;
    use zoomreel_project_model::geometry::{Rect, Size};
    use zoomreel_project_model::motion::{MotionKind, ViewportMotion};

    use super::*;

    fn output() -> DirectorOutput {
        DirectorOutput {
            output_duration_ms: 2000.0,
            output_size: Size::new(1000.0, 500.0),
            focus_areas: vec![],
            motions: vec![ViewportMotion {
                id: "auto-zoom-0".to_string(),
                output_end_time_ms: 2000.0,
                duration_ms: 2000.0,
                rect: Rect::new(250.0, 125.0, 500.0, 250.0),
                reason: FocusReason::Click,
                kind: MotionKind::Auto,
            }],
            spotlights: vec![],
        }
    }

    #[test]
    fn preview_generates_frames() {
        let frames = simulate_camera_motion(&output(), 10.0);
        assert_eq!(frames.len(), 21);
        assert!((frames[0].scale_x - 1.0).abs() < 1e-9);
        let last = frames.last().unwrap();
        assert!((last.scale_x - 2.0).abs() < 1e-9);
        assert!((last.translate_x_percent + 25.0).abs() < 1e-9);
        assert!((last.translate_y_percent + 25.0).abs() < 1e-9);
    }

    #[test]
    fn css_transform_string_is_stable() {
        let frame = CameraMotionFrame {
            time_ms: 1000.0,
            translate_x_percent: -12.345,
            translate_y_percent: -9.876,
            scale_x: 1.5,
            scale_y: 1.4,
            spotlights: 0,
        };
        let css = frame.css_transform();
        assert!(css.contains("translate(-12.345%, -9.876%)"));
        assert!(css.contains("scale(1.5000, 1.4000)"));
    }
}
