//! Run the auto-director on a project.

use std::path::PathBuf;
use std::time::Instant;

use zoomreel_common::config::AppConfig;
use zoomreel_processing_core::Director;
use zoomreel_project_model::event::parse_events;

use super::load_project;

/// Setting overrides from the command line.
pub struct Overrides {
    pub no_zoom: bool,
    pub no_spotlight: bool,
    pub max_zoom: Option<f64>,
}

pub fn run(
    config: &AppConfig,
    path: PathBuf,
    output: Option<PathBuf>,
    events: Option<PathBuf>,
    overrides: Overrides,
) -> anyhow::Result<()> {
    println!("Analyzing project at: {}", path.display());

    let mut project = load_project(&path)?;

    if let Some(events_path) = events {
        let content = std::fs::read_to_string(&events_path)
            .map_err(|_| anyhow::anyhow!("Events file not found: {}", events_path.display()))?;
        project.events =
            parse_events(&content).map_err(|e| anyhow::anyhow!("Failed to parse events: {e}"))?;
        println!("  Loaded {} events from {}", project.events.len(), events_path.display());
    }

    if overrides.no_zoom {
        project.settings.zoom.auto_zoom = false;
    }
    if overrides.no_spotlight {
        project.settings.spotlight.enabled = false;
    }
    if let Some(max_zoom) = overrides.max_zoom {
        project.settings.zoom.max_zoom = max_zoom;
    }

    for issue in project.validate() {
        tracing::warn!("{issue}");
    }

    let started = Instant::now();
    let result = Director::run(&project);
    tracing::debug!(elapsed_us = started.elapsed().as_micros() as u64, "analysis finished");

    println!("  Output duration: {:.1}s", result.output_duration_ms / 1000.0);
    println!("  Focus areas: {}", result.focus_areas.len());
    println!("  Camera motions: {}", result.motions.len());
    println!("  Spotlights: {}", result.spotlights.len());

    let output = output.unwrap_or_else(|| path.with_extension("schedule.json"));
    result
        .into_schedule()
        .save(&output, config.pretty_json)
        .map_err(|e| anyhow::anyhow!("Failed to save schedule: {e}"))?;

    println!("  Schedule saved to: {}", output.display());
    println!("\nAnalysis complete.");

    Ok(())
}
