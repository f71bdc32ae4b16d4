//! Project and schedule documents.
//!
//! A project bundles everything the auto-director reads: surface sizes,
//! kept windows, recorded events and policy settings. A schedule is what
//! it writes back for the renderer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::event::{EventStreams, InputEvent};
use crate::focus::FocusArea;
use crate::geometry::Size;
use crate::motion::{Spotlight, ViewportMotion};
use crate::settings::DirectorSettings;
use crate::window::{window_issues, OutputWindow};

/// Current document schema version.
pub const SCHEMA_VERSION: &str = "1.0";

/// Input document (`project.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomProject {
    /// Schema version.
    pub version: String,

    /// Human-readable project name.
    pub name: String,

    /// Recorded video dimensions (pixels).
    pub source_size: Size,

    /// Rendered canvas dimensions (pixels).
    pub output_size: Size,

    /// Inset of the video inside the canvas, as a fraction of each
    /// dimension per side.
    #[serde(default)]
    pub padding: f64,

    /// Kept segments of source time.
    pub windows: Vec<OutputWindow>,

    /// Recorded events in any order.
    #[serde(default)]
    pub events: Vec<InputEvent>,

    #[serde(default)]
    pub settings: DirectorSettings,
}

/// Output document (`schedule.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub version: String,

    /// Generation timestamp (RFC 3339).
    pub generated_at: String,

    pub output_duration_ms: f64,
    pub focus_areas: Vec<FocusArea>,
    pub motions: Vec<ViewportMotion>,
    pub spotlights: Vec<Spotlight>,
}

impl ZoomProject {
    /// Create a project with a single window covering `duration_ms`.
    pub fn new(
        name: impl Into<String>,
        source_size: Size,
        output_size: Size,
        duration_ms: f64,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            name: name.into(),
            source_size,
            output_size,
            padding: 0.0,
            windows: vec![OutputWindow::new("main", 0.0, duration_ms)],
            events: vec![],
            settings: DirectorSettings::default(),
        }
    }

    /// Categorize the recorded events.
    pub fn event_streams(&self) -> EventStreams {
        EventStreams::from_events(self.events.iter().cloned())
    }

    /// Load a project document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        read_json(path.as_ref())
    }

    /// Save the project document, pretty-printed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        write_json(path.as_ref(), self, true)
    }

    /// Problems that make the project unlikely to produce useful output.
    /// Scheduling still runs on a project with issues.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];

        if self.source_size.is_empty() {
            errors.push(format!(
                "source_size must be positive, got {}x{}",
                self.source_size.width, self.source_size.height
            ));
        }
        if self.output_size.is_empty() {
            errors.push(format!(
                "output_size must be positive, got {}x{}",
                self.output_size.width, self.output_size.height
            ));
        }
        if !(0.0..0.5).contains(&self.padding) {
            errors.push(format!("padding must be in [0, 0.5), got {}", self.padding));
        }
        if self.windows.is_empty() {
            errors.push("no output windows: nothing would be rendered".to_string());
        }
        errors.extend(window_issues(&self.windows));
        errors.extend(self.settings.issues());

        errors
    }

    /// Fail with a [`ProjectError::ValidationError`] if [`validate`](Self::validate)
    /// reports anything.
    pub fn ensure_valid(&self) -> Result<(), ProjectError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProjectError::ValidationError {
                message: errors.join("; "),
            })
        }
    }
}

impl Schedule {
    pub fn new(
        output_duration_ms: f64,
        focus_areas: Vec<FocusArea>,
        motions: Vec<ViewportMotion>,
        spotlights: Vec<Spotlight>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            output_duration_ms,
            focus_areas,
            motions,
            spotlights,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        read_json(path.as_ref())
    }

    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), ProjectError> {
        write_json(path.as_ref(), self, pretty)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|e| ProjectError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ProjectError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<(), ProjectError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| ProjectError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| ProjectError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Errors that can occur when working with project documents.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid project: {message}")]
    ValidationError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::motion::MotionKind;
    use crate::FocusReason;

    fn sample_project() -> ZoomProject {
        let mut project = ZoomProject::new(
            "Demo",
            Size::new(1920.0, 1080.0),
            Size::new(1280.0, 720.0),
            10_000.0,
        );
        project.events = vec![
            InputEvent::click(1000.0, 100.0, 100.0),
            InputEvent::mouse_position(900.0, 90.0, 90.0),
        ];
        project
    }

    #[test]
    fn test_new_project_is_valid() {
        let project = sample_project();
        assert!(project.validate().is_empty());
        assert!(project.ensure_valid().is_ok());
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut project = sample_project();
        project.output_size = Size::new(0.0, 720.0);
        project.padding = 0.7;
        project.windows.push(OutputWindow::new("late", 5000.0, 12_000.0));

        let errors = project.validate();
        assert_eq!(errors.len(), 3);
        assert!(matches!(
            project.ensure_valid(),
            Err(ProjectError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_project_save_and_load() {
        let dir = std::env::temp_dir().join("zoomreel_test_project");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("project.json");

        let project = sample_project();
        project.save(&path).unwrap();
        let loaded = ZoomProject::load(&path).unwrap();
        assert_eq!(loaded, project);
        assert_eq!(loaded.event_streams().mouse_positions.len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_project_defaults_optional_fields() {
        let raw = r#"{
            "version": "1.0",
            "name": "Minimal",
            "source_size": {"width": 100.0, "height": 100.0},
            "output_size": {"width": 100.0, "height": 100.0},
            "windows": [{"id": "a", "start_ms": 0.0, "end_ms": 10.0}]
        }"#;
        let parsed: ZoomProject = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.padding, 0.0);
        assert!(parsed.events.is_empty());
        assert_eq!(parsed.settings, DirectorSettings::default());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = ZoomProject::load("/nonexistent/zoomreel/project.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/zoomreel/project.json"));
    }

    #[test]
    fn test_schedule_roundtrip() {
        let dir = std::env::temp_dir().join("zoomreel_test_schedule");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("schedule.json");

        let schedule = Schedule::new(
            5000.0,
            vec![FocusArea::new(
                1000.0,
                Rect::new(0.0, 0.0, 10.0, 10.0),
                FocusReason::Click,
            )],
            vec![ViewportMotion {
                id: "auto-zoom-0".to_string(),
                output_end_time_ms: 1000.0,
                duration_ms: 1000.0,
                rect: Rect::new(0.0, 0.0, 640.0, 360.0),
                reason: FocusReason::Click,
                kind: MotionKind::Auto,
            }],
            vec![],
        );
        schedule.save(&path, false).unwrap();
        let loaded = Schedule::load(&path).unwrap();
        assert_eq!(loaded, schedule);

        std::fs::remove_dir_all(&dir).ok();
    }
}
