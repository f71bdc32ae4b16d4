//! Validate a ZoomReel project document.

use std::path::PathBuf;

use zoomreel_processing_core::TimeMapper;

use super::load_project;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating project at: {}", path.display());

    let project = load_project(&path)?;

    println!("  Name: {}", project.name);
    println!("  Version: {}", project.version);
    println!(
        "  Source: {}x{}",
        project.source_size.width, project.source_size.height
    );
    println!(
        "  Output: {}x{}",
        project.output_size.width, project.output_size.height
    );
    println!("  Windows: {}", project.windows.len());
    println!(
        "  Output duration: {:.1}s",
        TimeMapper::new(&project.windows).output_duration() / 1000.0
    );

    let errors = project.validate();
    if errors.is_empty() {
        println!("\nProject is valid.");
    } else {
        println!("\nValidation issues:");
        for error in &errors {
            println!("  - {error}");
        }
        println!(
            "\n{} issue(s) found. Generated schedules may be unexpected.",
            errors.len()
        );
    }

    Ok(())
}
