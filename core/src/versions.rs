//! Registry of known TypeScript versions.
//!
//! The table is process-wide static data: an ordered run of deprecated
//! versions followed by an ordered run of supported versions, plus one
//! distribution tag per supported version and a trailing `latest` tag.
//!
//! Every version is `D.D` (single-digit components), so lexical string
//! comparison orders versions correctly.
//!
//! Queries that locate a version by position panic when handed a version
//! outside the expected sequence. Callers validate user input with
//! [`VersionTable::is_known`] or [`VersionTable::is_supported`] first.
//!
//! # Examples
//!
//! ```
//! use dts_header_core::TYPESCRIPT_VERSIONS;
//!
//! assert!(TYPESCRIPT_VERSIONS.is_supported("3.0"));
//! assert!(!TYPESCRIPT_VERSIONS.is_supported("2.0"));
//! assert_eq!(TYPESCRIPT_VERSIONS.previous("3.0"), Some("2.9"));
//! assert_eq!(TYPESCRIPT_VERSIONS.tags_to_update("3.9"), ["ts3.9", "latest"]);
//! ```

/// Tag that always trails the distribution tag sequence.
pub const LATEST_TAG: &str = "latest";

/// Compiler version assumed when a header does not declare one.
///
/// Kept as a fixed constant rather than read from
/// [`VersionTable::lowest`]; `test_default_matches_lowest_supported` pins
/// the two together.
pub const DEFAULT_TYPESCRIPT_VERSION: &str = "2.8";

/// Ordered table of compiler versions and their derived queries.
#[derive(Debug)]
pub struct VersionTable {
    deprecated: &'static [&'static str],
    supported: &'static [&'static str],
    tags: &'static [&'static str],
    redirect_cutoff: &'static str,
}

/// The TypeScript version table.
pub static TYPESCRIPT_VERSIONS: VersionTable = VersionTable {
    deprecated: &["2.0", "2.1", "2.2", "2.3", "2.4", "2.5", "2.6", "2.7"],
    supported: &[
        "2.8", "2.9", "3.0", "3.1", "3.2", "3.3", "3.4", "3.5", "3.6", "3.7", "3.8", "3.9",
    ],
    tags: &[
        "ts2.8", "ts2.9", "ts3.0", "ts3.1", "ts3.2", "ts3.3", "ts3.4", "ts3.5", "ts3.6", "ts3.7",
        "ts3.8", "ts3.9", LATEST_TAG,
    ],
    // Header redirection (`typesVersions`) first shipped in 3.1.
    redirect_cutoff: "3.1",
};

impl VersionTable {
    /// Versions that are no longer supported, oldest first.
    pub fn deprecated(&self) -> &'static [&'static str] {
        self.deprecated
    }

    /// Supported versions, oldest first.
    pub fn supported(&self) -> &'static [&'static str] {
        self.supported
    }

    /// Distribution tags, one per supported version, then [`LATEST_TAG`].
    pub fn tags(&self) -> &'static [&'static str] {
        self.tags
    }

    /// Every known version: deprecated first, then supported.
    pub fn all(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.deprecated.iter().chain(self.supported.iter()).copied()
    }

    /// Returns `true` if `version` is currently supported.
    pub fn is_supported(&self, version: &str) -> bool {
        self.supported.iter().any(|known| *known == version)
    }

    /// Returns `true` if `version` appears anywhere in the table.
    pub fn is_known(&self, version: &str) -> bool {
        self.all().any(|known| known == version)
    }

    /// Interns `version` as the table's static token, if it is known.
    pub fn lookup(&self, version: &str) -> Option<&'static str> {
        self.all().find(|known| *known == version)
    }

    /// Oldest supported version.
    pub fn lowest(&self) -> &'static str {
        self.supported[0]
    }

    /// Newest supported version.
    pub fn latest(&self) -> &'static str {
        self.supported[self.supported.len() - 1]
    }

    /// Supported versions greater than or equal to `min`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dts_header_core::TYPESCRIPT_VERSIONS;
    ///
    /// assert_eq!(TYPESCRIPT_VERSIONS.range("3.8"), ["3.8", "3.9"]);
    /// assert!(TYPESCRIPT_VERSIONS.range("9.9").is_empty());
    /// ```
    pub fn range(&self, min: &str) -> &'static [&'static str] {
        let start = self
            .supported
            .iter()
            .position(|version| *version >= min)
            .unwrap_or(self.supported.len());
        &self.supported[start..]
    }

    /// Supported version immediately before `version`.
    ///
    /// # Panics
    ///
    /// Panics if `version` is not supported.
    pub fn previous(&self, version: &str) -> Option<&'static str> {
        let index = self.supported_index(version);
        index.checked_sub(1).map(|prev| self.supported[prev])
    }

    /// Tags that must be repointed when `version` becomes supported: the tag
    /// for `version` through [`LATEST_TAG`].
    ///
    /// # Panics
    ///
    /// Panics if `version` has no distribution tag.
    pub fn tags_to_update(&self, version: &str) -> &'static [&'static str] {
        let tag = format!("ts{version}");
        let index = self
            .tags
            .iter()
            .position(|candidate| *candidate == tag)
            .unwrap_or_else(|| panic!("no distribution tag for TypeScript {version}"));
        &self.tags[index..]
    }

    /// Returns `true` if `version` understands header redirection.
    ///
    /// # Panics
    ///
    /// Panics if `version` is not in the table.
    pub fn is_redirectable(&self, version: &str) -> bool {
        let position = self
            .all()
            .position(|known| known == version)
            .unwrap_or_else(|| panic!("unknown TypeScript version {version}"));
        let cutoff = self
            .all()
            .position(|known| known == self.redirect_cutoff)
            .unwrap_or_else(|| panic!("redirect cutoff {} missing", self.redirect_cutoff));
        position >= cutoff
    }

    fn supported_index(&self, version: &str) -> usize {
        self.supported
            .iter()
            .position(|candidate| *candidate == version)
            .unwrap_or_else(|| panic!("TypeScript {version} is not a supported version"))
    }
}
