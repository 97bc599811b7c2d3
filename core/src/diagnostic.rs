//! Positioned parse failures and their human-readable rendering.
//!
//! A [`ParseError`] records where the header grammar stopped (byte offset,
//! 1-based line and column) and which inputs would have been accepted there.
//! Its `Display` implementation is the rendered diagnostic, identical for
//! strict and lenient parses.
//!
//! # Examples
//!
//! ```
//! use dts_header_core::ParseError;
//!
//! let error = ParseError::at("// Type\n// Proj", 12, ["\"// Project: \""]);
//! assert_eq!(error.line, 2);
//! assert_eq!(error.column, 5);
//! assert_eq!(error.to_string(), "At 2:5 : Expected \"// Project: \"");
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A header that failed to parse.
///
/// `expected` is never empty. It is sorted and free of duplicates so that
/// alternatives merged from several branches render deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("At {line}:{column} : Expected {}", render_expected(.expected))]
pub struct ParseError {
    /// Byte offset into the parsed text.
    pub index: usize,
    /// 1-based line of `index`.
    pub line: usize,
    /// 1-based column of `index`, counted in characters.
    pub column: usize,
    /// Descriptions of every alternative that could have matched at `index`.
    pub expected: Vec<String>,
}

impl ParseError {
    /// Creates an error at byte offset `index` of `input`.
    ///
    /// # Panics
    ///
    /// Panics if `expected` is empty or `index` is not a char boundary of
    /// `input`; both are bugs in the grammar, not in the parsed text.
    pub fn at<I, S>(input: &str, index: usize, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected: BTreeSet<String> = expected.into_iter().map(Into::into).collect();
        assert!(!expected.is_empty(), "parse error without expectations");
        let (line, column) = line_column(input, index);
        Self {
            index,
            line,
            column,
            expected: expected.into_iter().collect(),
        }
    }

    /// Returns the `expected` list rendered as in the error message.
    pub fn render_expected(&self) -> String {
        render_expected(&self.expected)
    }
}

/// Renders a set of expected alternatives: a single entry verbatim,
/// several as an enumerated `one of:` list.
///
/// # Examples
///
/// ```
/// use dts_header_core::render_expected;
///
/// assert_eq!(render_expected(&["a".to_string()]), "a");
/// assert_eq!(
///     render_expected(&["a".to_string(), "b".to_string()]),
///     "one of: a, b"
/// );
/// ```
pub fn render_expected(expected: &[String]) -> String {
    match expected {
        [single] => single.clone(),
        many => format!("one of: {}", many.join(", ")),
    }
}

/// Computes the 1-based line and column of a byte offset.
pub fn line_column(input: &str, index: usize) -> (usize, usize) {
    let before = &input[..index];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
