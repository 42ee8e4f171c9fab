//! Error types for the golden harness

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for golden harness operations
pub type GoldenResult<T> = Result<T, GoldenError>;

/// Main error type for the golden harness
///
/// `Read`, `Write` and `Walk` are fatal to the check that hit them.
/// `Mismatch` is not a system fault: it is the reported test failure and
/// carries the rendered diff as its message.
#[derive(Error, Debug)]
pub enum GoldenError {
    /// A fixture could not be read (missing, unreadable, not UTF-8)
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A fixture could not be created or written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed during discovery
    #[error("failed to walk {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },

    /// The diff renderer could not produce a report
    #[error("failed to render diff: {0}")]
    Diff(String),

    /// Actual output differs from the golden file
    #[error("{} does not match golden file\n{report}", .path.display())]
    Mismatch { path: PathBuf, report: String },

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),
}

impl GoldenError {
    /// Create a read error for `path`
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a write error for `path`
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a walk error rooted at `path`
    pub fn walk(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Walk {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a diff rendering error
    pub fn diff(message: impl Into<String>) -> Self {
        Self::Diff(message.into())
    }

    /// Create a mismatch error carrying the rendered report
    pub fn mismatch(path: impl Into<PathBuf>, report: impl Into<String>) -> Self {
        Self::Mismatch {
            path: path.into(),
            report: report.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Short stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "READ_ERROR",
            Self::Write { .. } => "WRITE_ERROR",
            Self::Walk { .. } => "WALK_ERROR",
            Self::Diff(_) => "DIFF_ERROR",
            Self::Mismatch { .. } => "MISMATCH",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether this error is a content mismatch rather than a system fault
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Walk { path, .. }
            | Self::Mismatch { path, .. } => Some(path),
            Self::Diff(_) | Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_display() {
        let err = GoldenError::read(
            "fixtures/in.txt.golden",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(
            err.to_string(),
            "failed to read fixtures/in.txt.golden: not found"
        );
        assert_eq!(err.error_code(), "READ_ERROR");
        assert!(!err.is_mismatch());
    }

    #[test]
    fn test_mismatch_carries_report() {
        let err = GoldenError::mismatch("a.txt", "Bytes/Lines: +1/+0\n");
        assert!(err.is_mismatch());
        assert_eq!(err.path(), Some(Path::new("a.txt")));
        assert!(err.to_string().ends_with("Bytes/Lines: +1/+0\n"));
    }

    #[test]
    fn test_config_error_has_no_path() {
        let err = GoldenError::config("channel_size must be at least 1");
        assert_eq!(err.path(), None);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
