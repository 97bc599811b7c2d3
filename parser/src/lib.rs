//! Parser for the metadata header of type-definition files.
//!
//! A definition file starts with a fixed comment block:
//!
//! ```text
//! // Type definitions for foo 1.2
//! // Project: https://github.com/foo/foo, https://foo.com
//! // Definitions by: My Self <https://github.com/me>,
//! //                 Some Other Guy <https://github.com/otherguy>
//! // Definitions: https://github.com/DefinitelyTyped/DefinitelyTyped
//! // TypeScript Version: 2.9
//! ```
//!
//! The first line may read `// Type definitions for non-npm package foo 1.2`
//! for libraries that are not published on the package registry. The
//! `TypeScript Version` line is optional and defaults to
//! [`DEFAULT_TYPESCRIPT_VERSION`]. Nothing after the header is parsed.
//!
//! # Main entry points
//!
//! - [`parse_header`]: validating parse in either [`ParseMode`]; returns the
//!   [`Header`] or a positioned [`ParseError`].
//! - [`parse_header_or_fail`]: lenient parse for callers that expect
//!   well-formed input.
//! - [`validate`]: strict parse that only reports the failure.
//! - [`parse_typescript_version_line`]: a single, already-extracted
//!   `TypeScript Version` line.
//!
//! When parsing fails, the error describes the position that the parse got
//! furthest to, together with every alternative that could have continued
//! from there.
//!
//! # Example
//!
//! ```
//! use dts_header_parser::{ParseMode, parse_header};
//!
//! let text = "\
//! // Type definitions for Foo 1.2
//! // Project: http://a
//! // Definitions by: Jane <https://github.com/jane>
//! // Definitions: http://a
//! ";
//!
//! let header = parse_header(text, ParseMode::Lenient).unwrap();
//! assert_eq!(header.library_name, "Foo");
//! assert_eq!(header.typescript_version, "2.8");
//! assert_eq!(header.contributors[0].github_username.as_deref(), Some("jane"));
//! ```
//!
//! [`DEFAULT_TYPESCRIPT_VERSION`]: dts_header_core::DEFAULT_TYPESCRIPT_VERSION

mod error;
mod grammar;
mod label;
mod lists;

use tracing::debug;

use grammar::{Failed, Grammar};

pub use dts_header_core::{Author, Header, ParseError, ParseMode, render_expected};
pub use error::{HeaderError, Result};

/// Parses a header in the given mode.
///
/// # Examples
///
/// ```
/// use dts_header_parser::{ParseMode, parse_header};
///
/// let text = "// Type definitions for foo\n// Project: x\n// Definitions by: A <u>\n// Definitions: d\n";
/// let header = parse_header(text, ParseMode::Lenient).unwrap();
/// assert_eq!((header.library_major_version, header.library_minor_version), (0, 0));
///
/// let error = parse_header(text, ParseMode::Strict).unwrap_err();
/// assert_eq!(error.line, 1);
/// assert_eq!(error.expected, ["foo MAJOR.MINOR (needs MAJOR.MINOR)"]);
/// ```
pub fn parse_header(text: &str, mode: ParseMode) -> std::result::Result<Header, ParseError> {
    let mut grammar = Grammar::new(text, mode);
    match grammar.header() {
        Ok((end, header)) => {
            debug!(
                library = %header.library_name,
                version = %header.version_label(),
                header_len = end,
                ?mode,
                "parsed header"
            );
            Ok(header)
        }
        Err(Failed) => {
            let error = grammar.into_error();
            debug!(%error, ?mode, "header rejected");
            Err(error)
        }
    }
}

/// Parses a header leniently, failing with the rendered diagnostic.
///
/// # Errors
///
/// Returns [`HeaderError::Malformed`] when the text does not start with a
/// well-formed header.
pub fn parse_header_or_fail(text: &str) -> Result<Header> {
    Ok(parse_header(text, ParseMode::Lenient)?)
}

/// Checks a header in strict mode, returning the failure if there is one.
///
/// # Examples
///
/// ```
/// use dts_header_parser::validate;
///
/// let text = "// Type definitions for foo 1.2.3\n";
/// let error = validate(text).unwrap();
/// assert_eq!(error.to_string(), "At 1:25 : Expected foo MAJOR.MINOR (patch version not allowed)");
/// ```
pub fn validate(text: &str) -> Option<ParseError> {
    parse_header(text, ParseMode::Strict).err()
}

/// Parses an isolated `// [Minimum ]TypeScript Version: D.D` line.
///
/// A trailing line terminator is ignored; anything else after the version
/// is an error.
///
/// # Errors
///
/// Returns [`HeaderError::VersionLine`] when the line is malformed or names
/// a version missing from the version table.
///
/// # Examples
///
/// ```
/// use dts_header_parser::parse_typescript_version_line;
///
/// assert_eq!(parse_typescript_version_line("// TypeScript Version: 3.2").unwrap(), "3.2");
/// assert!(parse_typescript_version_line("// TypeScript Version: 9.9").is_err());
/// ```
pub fn parse_typescript_version_line(line: &str) -> Result<&'static str> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let mut grammar = Grammar::new(trimmed, ParseMode::Lenient);
    let outcome = match grammar.typescript_version_line(0) {
        Ok((end, version)) if end == trimmed.len() => Ok(version),
        Ok((end, _)) => {
            grammar.record(end, "end of line");
            Err(Failed)
        }
        Err(Failed) => Err(Failed),
    };
    outcome.map_err(|Failed| HeaderError::VersionLine {
        line: line.to_string(),
        source: grammar.into_error(),
    })
}
