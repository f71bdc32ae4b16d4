//! Point-in-time camera state.
//!
//! Motions are replayed in order. Each one owns the interval from its start
//! until either its end or the next motion's start, whichever comes first,
//! so a later motion interrupts an earlier one mid-flight and continues
//! from wherever the camera was.

use zoomreel_project_model::geometry::{Rect, Size};
use zoomreel_project_model::motion::ViewportMotion;

/// Standard cubic ease-in-out on `[0, 1]`. Input is clamped.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn progress(motion: &ViewportMotion, at_ms: f64) -> f64 {
    if motion.duration_ms <= 0.0 {
        return 1.0;
    }
    ease_in_out_cubic((at_ms - motion.output_start_time_ms()) / motion.duration_ms)
}

/// Viewport (output space) at output time `t_ms`.
///
/// `motions` must be ordered by end time with non-decreasing start times,
/// which is what the zoom scheduler produces. Before the first motion
/// starts the camera shows the full output frame.
pub fn get_viewport_state_at_time(motions: &[ViewportMotion], t_ms: f64, output_size: Size) -> Rect {
    let mut current = Rect::from_size(output_size);

    for (i, motion) in motions.iter().enumerate() {
        if t_ms < motion.output_start_time_ms() {
            break;
        }

        let owned_until = motions
            .get(i + 1)
            .map_or(motion.output_end_time_ms, |next| {
                next.output_start_time_ms().min(motion.output_end_time_ms)
            });

        if t_ms < owned_until {
            return Rect::lerp(&current, &motion.rect, progress(motion, t_ms));
        }

        current = if owned_until >= motion.output_end_time_ms {
            motion.rect
        } else {
            // Interrupted: freeze wherever the camera was.
            Rect::lerp(&current, &motion.rect, progress(motion, owned_until))
        };
    }

    current
}
