//! Batch validation of type-definition headers.
//!
//! Finds the entry file of every package under a definitions root, parses
//! each header in parallel, and collects the results into a [`LintReport`].
//!
//! # Example
//!
//! ```no_run
//! use dts_header_lint::{LintConfig, lint};
//!
//! let config = LintConfig::load(".dts-header.yml").unwrap_or_default();
//! let report = lint("DefinitelyTyped", &config).unwrap();
//! for outcome in report.failures() {
//!     println!("{}: {:?}", outcome.package, outcome.status);
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod report;

use std::path::Path;

pub use config::{DEFAULT_CONFIG_FILE, LintConfig};
pub use error::{LintError, Result};
pub use loader::{DefinitionsRoot, PackageEntry, TYPES_DIR};
pub use report::{LintOutcome, LintReport, LintStatus, check_file, check_files};

/// Scans `root` and checks every package found, as configured.
///
/// # Errors
///
/// Returns [`LintError::InvalidConfig`] for an unusable configuration and
/// any error from [`DefinitionsRoot::scan`]. Rejected headers are reported,
/// not returned as errors.
pub fn lint(root: impl AsRef<Path>, config: &LintConfig) -> Result<LintReport> {
    config.validate()?;
    let definitions = DefinitionsRoot::scan(root, config)?;
    Ok(check_files(definitions.packages(), config.mode, config.jobs))
}
