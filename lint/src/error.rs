//! Error types for lint runs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a lint run before any header is checked.
///
/// A malformed header is not an error at this level; it is recorded in the
/// [`LintReport`](crate::LintReport).
#[derive(Debug, Error)]
pub enum LintError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The scanned directory holds no package with an entry file.
    #[error("no header files found under {}", .0.display())]
    NoHeaderFiles(PathBuf),

    /// Configuration values that cannot drive a run.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results with [`LintError`].
pub type Result<T> = std::result::Result<T, LintError>;
