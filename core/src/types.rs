//! Header type definitions.
//!
//! This module defines the records produced by a successful header parse.
//! The types are designed for serialization with [`serde`] so that tooling
//! can emit them as JSON or YAML without conversion.

use serde::{Deserialize, Serialize};

/// Host prefix of a canonical contributor profile URL.
pub const PROFILE_URL_PREFIX: &str = "https://github.com/";

/// Rule set applied while parsing a header.
///
/// Lenient mode is used for default extraction; strict mode rejects legacy
/// constructs and is what linting runs with.
///
/// # Examples
///
/// ```
/// use dts_header_core::ParseMode;
///
/// assert_eq!(ParseMode::default(), ParseMode::Lenient);
/// assert!(ParseMode::Strict.is_strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Reject missing versions, patch components, `v` markers and
    /// non-canonical contributor URLs.
    Strict,
    /// Accept every legacy construct (the default).
    #[default]
    Lenient,
}

impl ParseMode {
    /// Returns `true` for [`ParseMode::Strict`].
    pub fn is_strict(self) -> bool {
        matches!(self, ParseMode::Strict)
    }

    /// Maps a boolean strictness flag onto a mode.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

/// A contributor listed on the `// Definitions by:` line.
///
/// # Examples
///
/// ```
/// use dts_header_core::Author;
///
/// let author = Author::from_url("Jane", "https://github.com/jane");
/// assert_eq!(author.github_username.as_deref(), Some("jane"));
///
/// let other = Author::from_url("Jane", "https://example.com/jane");
/// assert_eq!(other.github_username, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name as written in the header.
    pub name: String,
    /// Profile or homepage URL.
    pub url: String,
    /// Username, present only when `url` is exactly a canonical profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
}

impl Author {
    /// Builds an author from a canonical profile username. The URL is
    /// reconstructed from the username rather than copied.
    pub fn from_username(name: impl Into<String>, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            name: name.into(),
            url: format!("{PROFILE_URL_PREFIX}{username}"),
            github_username: Some(username),
        }
    }

    /// Builds an author from an arbitrary URL, deriving the username only
    /// when the URL matches the canonical profile pattern exactly.
    pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let github_username = profile_username(&url).map(String::from);
        Self {
            name: name.into(),
            url,
            github_username,
        }
    }
}

/// Returns the username of a canonical profile URL
/// (`https://github.com/USERNAME`, USERNAME in `[A-Za-z0-9-]+`).
///
/// # Examples
///
/// ```
/// use dts_header_core::profile_username;
///
/// assert_eq!(profile_username("https://github.com/some-one"), Some("some-one"));
/// assert_eq!(profile_username("https://github.com/some-one/"), None);
/// assert_eq!(profile_username("https://gitlab.com/some-one"), None);
/// ```
pub fn profile_username(url: &str) -> Option<&str> {
    let username = url.strip_prefix(PROFILE_URL_PREFIX)?;
    if is_profile_username(username) {
        Some(username)
    } else {
        None
    }
}

/// Returns `true` if `candidate` is a non-empty run of `[A-Za-z0-9-]`.
pub fn is_profile_username(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

/// Metadata parsed from the leading comment block of a declaration file.
///
/// A header is produced once per successful parse and never mutated
/// afterwards. `projects` and `contributors` always hold at least one entry.
///
/// # Examples
///
/// ```
/// use dts_header_core::{Author, Header};
///
/// let header = Header {
///     non_npm: false,
///     library_name: "foo".into(),
///     library_major_version: 1,
///     library_minor_version: 2,
///     typescript_version: "2.8".into(),
///     projects: vec!["https://foo.dev".into()],
///     contributors: vec![Author::from_username("Jane", "jane")],
/// };
/// assert_eq!(header.version_label(), "1.2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Set by the `non-npm package` marker: the library is not published on
    /// the package registry.
    pub non_npm: bool,
    pub library_name: String,
    pub library_major_version: u32,
    pub library_minor_version: u32,
    /// Minimum compiler version, declared or defaulted.
    pub typescript_version: String,
    pub projects: Vec<String>,
    pub contributors: Vec<Author>,
}

impl Header {
    /// Returns the library version as `MAJOR.MINOR`.
    pub fn version_label(&self) -> String {
        format!(
            "{}.{}",
            self.library_major_version, self.library_minor_version
        )
    }
}
