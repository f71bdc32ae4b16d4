//! Print sampled camera transforms for a project.

use std::path::PathBuf;

use zoomreel_processing_core::camera_preview::simulate_camera_motion;
use zoomreel_processing_core::Director;

use super::load_project;

pub fn run(path: PathBuf, fps: f64, json: bool) -> anyhow::Result<()> {
    let project = load_project(&path)?;
    let result = Director::run(&project);
    let frames = simulate_camera_motion(&result, fps);
    tracing::debug!(frames = frames.len(), fps, "preview sampled");

    for frame in &frames {
        if json {
            let line = serde_json::to_string(frame)
                .map_err(|e| anyhow::anyhow!("Failed to serialize frame: {e}"))?;
            println!("{line}");
        } else {
            let marker = if frame.spotlights > 0 { " *" } else { "" };
            println!(
                "{:>10.1} ms  {}{marker}",
                frame.time_ms,
                frame.css_transform()
            );
        }
    }

    Ok(())
}
