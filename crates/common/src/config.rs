//! Application configuration.
//!
//! Scheduling policy (zoom, hover, spotlight thresholds) travels with each
//! project; this file only covers tool-level preferences.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ZoomreelError, ZoomreelResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Frame rate used when sampling camera previews.
    pub preview_fps: f64,

    /// Whether written schedules are pretty-printed.
    pub pretty_json: bool,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "zoomreel=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_fps: 30.0,
            pretty_json: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> ZoomreelResult<Self> {
        if !path.exists() {
            return Err(ZoomreelError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> ZoomreelResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ZoomreelResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> ZoomreelResult<()> {
        if !(self.preview_fps.is_finite() && self.preview_fps > 0.0) {
            return Err(ZoomreelError::config(format!(
                "preview_fps must be positive, got {}",
                self.preview_fps
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("zoomreel").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("zoomreel_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let config = AppConfig {
            preview_fps: 60.0,
            pretty_json: false,
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: true,
            },
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = serde_json::from_str(r#"{"preview_fps": 24.0}"#).unwrap();
        assert_eq!(parsed.preview_fps, 24.0);
        assert!(parsed.pretty_json);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = AppConfig::load_from(Path::new("/nonexistent/zoomreel/config.json"));
        assert!(matches!(err, Err(ZoomreelError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_fps_rejected() {
        let dir = std::env::temp_dir().join("zoomreel_test_config_invalid");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"preview_fps": 0.0}"#).unwrap();

        let err = AppConfig::load_from(&path);
        assert!(matches!(err, Err(ZoomreelError::Config { .. })));

        std::fs::remove_dir_all(&dir).ok();
    }
}
