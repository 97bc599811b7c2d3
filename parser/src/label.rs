//! Library name and version from the header's first line.
//!
//! The name may itself contain digits, periods and spaces, so the version
//! suffix is matched from the end of the line: the name is the shortest
//! prefix after which the rest of the line is a complete version suffix.
//!
//! Accepted suffixes are `MAJOR.MINOR`, `MAJOR.MINOR.PATCH` and either of
//! those with a `v` marker immediately before or after the digits. `x` may
//! stand for either component and counts as zero.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::grammar::{Grammar, Step};

const LABEL_EXPECTATION: &str = "foo MAJOR.MINOR";

// `.+?` keeps the name as short as possible, which leaves the longest
// version suffix that still reaches the end of the line.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<name>.+?)
        (?:
            \x20
            (?P<leading_v>v)?
            (?P<major>[0-9]+|x) \. (?P<minor>[0-9]+|x)
            (?: \. (?P<patch>[0-9]+) )?
            (?P<trailing_v>v)?
        )?
        $",
    )
    .expect("static regex must compile")
});

/// Name and version of the described library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Label {
    pub(crate) name: String,
    pub(crate) major: u32,
    pub(crate) minor: u32,
}

impl Grammar<'_> {
    /// Parses the rest of the current line as a label and consumes the line
    /// terminator (`\n` or `\r\n`).
    pub(crate) fn label(&mut self, at: usize) -> Step<Label> {
        let input = self.input();
        let strict = self.mode().is_strict();

        let Some(line_len) = input[at..].find(['\r', '\n']) else {
            return self.fail(at, LABEL_EXPECTATION);
        };
        let line_end = at + line_len;
        let end = if input[line_end..].starts_with("\r\n") {
            line_end + 2
        } else {
            line_end + 1
        };
        let line = &input[at..line_end];

        let Some(captures) = LABEL_RE.captures(line) else {
            return self.fail(at, LABEL_EXPECTATION);
        };
        let name = captures["name"].to_string();
        let marker = captures.name("leading_v").or(captures.name("trailing_v"));

        let (major, minor) = match (captures.name("major"), captures.name("minor")) {
            (Some(major), Some(minor)) => {
                let patch = captures.name("patch");
                if patch.is_some() && strict {
                    return self.fail(at, annotated("patch version not allowed"));
                }
                if marker.is_some() && strict {
                    return self.fail(at, annotated("'v' not allowed"));
                }
                // With a patch component the patch number is reported as the
                // major version. Existing consumers rely on this.
                let major_text = patch.unwrap_or(major).as_str();
                match (component(major_text), component(minor.as_str())) {
                    (Some(major), Some(minor)) => (major, minor),
                    _ => return self.fail(at, annotated("version number too large")),
                }
            }
            _ if strict => return self.fail(at, annotated("needs MAJOR.MINOR")),
            _ => (0, 0),
        };

        debug!(line, major, minor, "label split");
        Ok((end, Label { name, major, minor }))
    }
}

fn annotated(rule: &str) -> String {
    format!("{LABEL_EXPECTATION} ({rule})")
}

/// Parses one version component; `x` means zero.
fn component(text: &str) -> Option<u32> {
    if text == "x" {
        Some(0)
    } else {
        text.parse().ok()
    }
}
