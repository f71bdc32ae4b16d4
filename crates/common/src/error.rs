//! Error types shared across ZoomReel crates.
//!
//! The scheduling core itself never fails; these errors only surface at the
//! I/O edge (loading projects, reading config, writing schedules).

use std::path::PathBuf;

/// Top-level error type for ZoomReel operations.
#[derive(Debug, thiserror::Error)]
pub enum ZoomreelError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ZoomreelError.
pub type ZoomreelResult<T> = Result<T, ZoomreelError>;

impl ZoomreelError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ZoomreelError::config("preview_fps must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: preview_fps must be positive"
        );

        let err = ZoomreelError::FileNotFound {
            path: PathBuf::from("/tmp/missing.json"),
        };
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{nope");
        let err: ZoomreelError = parse.unwrap_err().into();
        assert!(matches!(err, ZoomreelError::Json(_)));
    }
}
