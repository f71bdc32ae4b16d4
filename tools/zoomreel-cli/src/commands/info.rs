//! Show project information.

use std::collections::BTreeMap;
use std::path::PathBuf;

use zoomreel_processing_core::{TimeMapper, ViewMapper};

use super::load_project;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let project = load_project(&path)?;

    println!("Project: {}", project.name);
    println!("  Version: {}", project.version);
    println!();

    let view = ViewMapper::new(project.source_size, project.output_size, project.padding);
    let content = view.content_rect();
    println!("Video:");
    println!(
        "  Source: {}x{}",
        project.source_size.width, project.source_size.height
    );
    println!(
        "  Output: {}x{} (padding {:.1}%)",
        project.output_size.width,
        project.output_size.height,
        project.padding * 100.0
    );
    println!(
        "  Content: {:.1}x{:.1} at ({:.1}, {:.1}), scale {:.4}",
        content.width,
        content.height,
        content.x,
        content.y,
        view.scale()
    );
    println!();

    let time = TimeMapper::new(&project.windows);
    println!("Windows:");
    for w in &project.windows {
        println!(
            "  {}: {:.3}s – {:.3}s ({:.3}s)",
            w.id,
            w.start_ms / 1000.0,
            w.end_ms / 1000.0,
            w.duration_ms() / 1000.0
        );
    }
    println!("  Output duration: {:.3}s", time.output_duration() / 1000.0);
    println!();

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for event in &project.events {
        *counts.entry(event.kind_name()).or_default() += 1;
    }
    println!("Events: {}", project.events.len());
    for (kind, count) in counts {
        println!("  {kind}: {count}");
    }
    println!();

    let s = &project.settings;
    println!("Settings:");
    println!(
        "  Auto zoom: {} (max {}x, motion {}–{} ms)",
        s.zoom.auto_zoom, s.zoom.max_zoom, s.zoom.min_motion_duration_ms, s.zoom.max_motion_duration_ms
    );
    println!(
        "  Spotlight: {} (scale {}, min {} ms)",
        s.spotlight.enabled, s.spotlight.enlarge_scale, s.spotlight.min_duration_ms
    );
    println!(
        "  Hover: box {:.0}% for {} ms",
        s.focus.hover_box_fraction * 100.0,
        s.focus.min_hover_duration_ms
    );

    Ok(())
}
