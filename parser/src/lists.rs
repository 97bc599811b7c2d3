//! Project and contributor lists.
//!
//! Both lists hold one or more entries separated either by `", "` or by an
//! optional comma, a line break, and a `//` continuation line indented by at
//! least two spaces. The indentation is what tells a continuation apart from
//! the next fixed header line.

use std::sync::LazyLock;

use regex::Regex;

use dts_header_core::{Author, ParseMode};

use crate::grammar::{Failed, Grammar, Step};

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:, |,?\r?\n// {2,})").expect("static regex must compile")
});
static PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^,\r\n]+").expect("static regex must compile"));
static CONTRIBUTOR_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^<\r\n]+) ").expect("static regex must compile"));
static STRICT_PROFILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<https://github\.com/([a-zA-Z0-9-]+)>").expect("static regex must compile")
});
static LENIENT_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([^>\r\n]+)> *").expect("static regex must compile"));

const SEPARATOR_EXPECTATION: &str = "\", \" or a continuation line indented by two spaces";

impl Grammar<'_> {
    /// One or more project URLs.
    pub(crate) fn projects(&mut self, at: usize) -> Step<Vec<String>> {
        self.separated(at, |grammar, at| {
            let (end, captures) = grammar.pattern(at, &PROJECT_RE, "project URL")?;
            Ok((end, captures[0].to_string()))
        })
    }

    /// One or more contributors, validated according to the grammar's mode.
    pub(crate) fn contributors(&mut self, at: usize) -> Step<Vec<Author>> {
        self.separated(at, Self::contributor)
    }

    fn contributor(&mut self, at: usize) -> Step<Author> {
        let mode = self.mode();
        let (at, captures) = self.pattern(at, &CONTRIBUTOR_NAME_RE, record_expectation(mode))?;
        let name = captures[1].to_string();

        match mode {
            ParseMode::Strict => {
                let (end, captures) = self.pattern(
                    at,
                    &STRICT_PROFILE_RE,
                    "<https://github.com/USERNAME>",
                )?;
                Ok((end, Author::from_username(name, &captures[1])))
            }
            ParseMode::Lenient => {
                let (end, captures) = self.pattern(at, &LENIENT_URL_RE, "<URL>")?;
                Ok((end, Author::from_url(name, &captures[1])))
            }
        }
    }

    /// `item (separator item)*`. A separator that is not followed by a
    /// complete item is left unconsumed.
    fn separated<T>(
        &mut self,
        at: usize,
        mut item: impl FnMut(&mut Self, usize) -> Step<T>,
    ) -> Step<Vec<T>> {
        let (mut at, first) = item(self, at)?;
        let mut items = vec![first];

        loop {
            let Ok((next, _)) = self.pattern(at, &SEPARATOR_RE, SEPARATOR_EXPECTATION) else {
                break;
            };
            match item(self, next) {
                Ok((end, value)) => {
                    items.push(value);
                    at = end;
                }
                Err(Failed) => break,
            }
        }

        Ok((at, items))
    }
}

fn record_expectation(mode: ParseMode) -> &'static str {
    match mode {
        ParseMode::Strict => "NAME <https://github.com/USERNAME>",
        ParseMode::Lenient => "NAME <URL>",
    }
}
