//! Sequential header grammar.
//!
//! Each rule is a method on [`Grammar`] that takes the byte offset to start
//! at and returns the offset after what it consumed, or [`Failed`]. Every
//! failure, including ones inside alternatives that were later abandoned, is
//! reported through [`Grammar::record`], which keeps only the failures that
//! got furthest into the input and merges the expectations of ties. When the
//! whole sequence fails, that furthest failure becomes the [`ParseError`].

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use dts_header_core::{
    DEFAULT_TYPESCRIPT_VERSION, Header, ParseError, ParseMode, TYPESCRIPT_VERSIONS,
};

use crate::label::Label;

/// Marker for a rule that failed. The failure itself has already been
/// recorded on the [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Failed;

/// Result of a rule: the offset after the match and the produced value.
pub(crate) type Step<T> = Result<(usize, T), Failed>;

static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^// Type definitions for (non-npm package )?")
        .expect("static regex must compile")
});
static DEFINITIONS_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\r?\n// Definitions by: ").expect("static regex must compile")
});
static DEFINITIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\r?\n// Definitions: [^\r\n]+").expect("static regex must compile")
});
static TS_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^// (?:Minimum )?TypeScript Version: ([0-9]\.[0-9])")
        .expect("static regex must compile")
});
static NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\r?\n").expect("static regex must compile"));

const PROJECT_MARKER: &str = "// Project: ";

#[derive(Debug)]
struct Furthest {
    index: usize,
    expected: BTreeSet<String>,
}

/// Parser state over one input text.
pub(crate) struct Grammar<'a> {
    input: &'a str,
    mode: ParseMode,
    furthest: Option<Furthest>,
}

impl<'a> Grammar<'a> {
    pub(crate) fn new(input: &'a str, mode: ParseMode) -> Self {
        Self {
            input,
            mode,
            furthest: None,
        }
    }

    pub(crate) fn input(&self) -> &'a str {
        self.input
    }

    pub(crate) fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Records that `expected` would have matched at `index`.
    pub(crate) fn record(&mut self, index: usize, expected: impl Into<String>) {
        let expected = expected.into();
        match &mut self.furthest {
            Some(furthest) if furthest.index > index => {}
            Some(furthest) if furthest.index == index => {
                furthest.expected.insert(expected);
            }
            _ => {
                self.furthest = Some(Furthest {
                    index,
                    expected: BTreeSet::from([expected]),
                });
            }
        }
    }

    /// Records a failure and returns it.
    pub(crate) fn fail<T>(&mut self, index: usize, expected: impl Into<String>) -> Step<T> {
        self.record(index, expected);
        Err(Failed)
    }

    /// Matches an exact string at `at`.
    pub(crate) fn literal(&mut self, at: usize, literal: &str) -> Step<()> {
        if self.input[at..].starts_with(literal) {
            Ok((at + literal.len(), ()))
        } else {
            self.fail(at, format!("{literal:?}"))
        }
    }

    /// Matches a `^`-anchored regex at `at`. Capture offsets are relative to
    /// `at`.
    pub(crate) fn pattern(
        &mut self,
        at: usize,
        regex: &Regex,
        expected: &str,
    ) -> Step<Captures<'a>> {
        let input: &'a str = self.input;
        match regex.captures(&input[at..]) {
            Some(captures) => {
                let end = at + captures.get(0).map_or(0, |whole| whole.end());
                Ok((end, captures))
            }
            None => self.fail(at, expected),
        }
    }

    /// Converts the furthest recorded failure into a [`ParseError`].
    pub(crate) fn into_error(self) -> ParseError {
        match self.furthest {
            Some(furthest) => ParseError::at(self.input, furthest.index, furthest.expected),
            None => ParseError::at(self.input, 0, ["header"]),
        }
    }

    /// Parses the complete header. Content after the optional compiler
    /// version line is not looked at.
    pub(crate) fn header(&mut self) -> Step<Header> {
        let (at, prefix) = self.pattern(0, &PREFIX_RE, "\"// Type definitions for \"")?;
        let non_npm = prefix.get(1).is_some();

        let (at, Label { name, major, minor }) = self.label(at)?;
        debug!(name = %name, major, minor, "parsed label");

        let (at, ()) = self.literal(at, PROJECT_MARKER)?;
        let (at, projects) = self.projects(at)?;
        let (at, _) = self.pattern(at, &DEFINITIONS_BY_RE, "\"// Definitions by: \"")?;
        let (at, contributors) = self.contributors(at)?;
        let (at, _) = self.pattern(
            at,
            &DEFINITIONS_RE,
            "\"// Definitions: \" followed by a URL",
        )?;
        let (at, typescript_version) = self.optional_typescript_version(at)?;

        Ok((
            at,
            Header {
                non_npm,
                library_name: name,
                library_major_version: major,
                library_minor_version: minor,
                typescript_version: typescript_version.to_string(),
                projects,
                contributors,
            },
        ))
    }

    /// Parses `// [Minimum ]TypeScript Version: D.D` at `at`. The captured
    /// version must be a known table entry.
    pub(crate) fn typescript_version_line(&mut self, at: usize) -> Step<&'static str> {
        let (end, captures) =
            self.pattern(at, &TS_VERSION_RE, "\"// TypeScript Version: D.D\"")?;
        let Some(token) = captures.get(1) else {
            return self.fail(at, "\"// TypeScript Version: D.D\"");
        };
        match TYPESCRIPT_VERSIONS.lookup(token.as_str()) {
            Some(version) => Ok((end, version)),
            None => {
                let token_index = at + token.start();
                self.fail(
                    token_index,
                    format!("{} is not yet supported.", token.as_str()),
                )
            }
        }
    }

    /// A line break followed by a compiler version declaration, or nothing.
    /// A declared but unknown version is an error; a missing line defaults
    /// to [`DEFAULT_TYPESCRIPT_VERSION`].
    fn optional_typescript_version(&mut self, at: usize) -> Step<&'static str> {
        let input = self.input;
        let Some(newline) = NEWLINE_RE.find(&input[at..]) else {
            self.record(at, "line break");
            return Ok((at, DEFAULT_TYPESCRIPT_VERSION));
        };
        let line_start = at + newline.end();
        if !TS_VERSION_RE.is_match(&input[line_start..]) {
            self.record(line_start, "\"// TypeScript Version: D.D\"");
            return Ok((at, DEFAULT_TYPESCRIPT_VERSION));
        }
        self.typescript_version_line(line_start)
    }
}
