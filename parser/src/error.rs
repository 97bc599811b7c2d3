//! Error types for the fail-fast entry points.

use thiserror::Error;

use dts_header_core::ParseError;

/// Errors returned by [`parse_header_or_fail`](crate::parse_header_or_fail)
/// and [`parse_typescript_version_line`](crate::parse_typescript_version_line).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The header did not match the grammar. Displays the rendered
    /// diagnostic.
    #[error(transparent)]
    Malformed(#[from] ParseError),

    /// A standalone compiler version line could not be parsed.
    #[error("Could not parse version: line is '{line}'")]
    VersionLine {
        line: String,
        #[source]
        source: ParseError,
    },
}

impl HeaderError {
    /// The underlying positioned failure.
    pub fn parse_error(&self) -> &ParseError {
        match self {
            HeaderError::Malformed(error) => error,
            HeaderError::VersionLine { source, .. } => source,
        }
    }
}

/// Convenience alias for results with [`HeaderError`].
pub type Result<T> = std::result::Result<T, HeaderError>;
