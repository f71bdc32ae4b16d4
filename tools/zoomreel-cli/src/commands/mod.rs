pub mod analyze;
pub mod info;
pub mod preview;
pub mod validate;

use std::path::Path;

use zoomreel_project_model::ZoomProject;

pub(crate) fn load_project(path: &Path) -> anyhow::Result<ZoomProject> {
    ZoomProject::load(path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))
}
