//! Core header types, version registry, and diagnostics.
//!
//! This crate defines the data model shared by the header parser and the
//! tooling built on top of it:
//!
//! - [`Header`]: metadata parsed from a declaration file's leading comment
//!   block (library name and version, projects, contributors, minimum
//!   compiler version).
//! - [`Author`]: a contributor, with a username derived from canonical
//!   profile URLs.
//! - [`ParseMode`]: strict or lenient rule set.
//! - [`ParseError`]: a positioned failure whose `Display` is the rendered
//!   diagnostic.
//! - [`TYPESCRIPT_VERSIONS`]: the static table of known compiler versions
//!   with positional queries ([`VersionTable::previous`],
//!   [`VersionTable::tags_to_update`], ...).
//!
//! [`make_types_versions_for_package_json`] turns a list of supported
//! versions into the `typesVersions` redirect map used by generated
//! manifests.
//!
//! # Example
//!
//! ```
//! use dts_header_core::*;
//!
//! let versions = TYPESCRIPT_VERSIONS.range("3.7");
//! assert_eq!(versions, ["3.7", "3.8", "3.9"]);
//!
//! let fragment = make_types_versions_for_package_json(versions).unwrap();
//! assert_eq!(fragment.len(), 3);
//! ```

mod diagnostic;
mod package;
mod types;
mod versions;

pub use diagnostic::{ParseError, line_column, render_expected};
pub use package::{TypesVersions, TypesVersionsRedirect, make_types_versions_for_package_json};
pub use types::*;
pub use versions::{DEFAULT_TYPESCRIPT_VERSION, LATEST_TAG, TYPESCRIPT_VERSIONS, VersionTable};
