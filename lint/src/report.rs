//! Parallel header checks and their structured report.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use dts_header_core::{Header, ParseError, ParseMode};
use dts_header_parser::parse_header;

use crate::loader::PackageEntry;

/// Result of checking one header file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LintStatus {
    /// The header parsed.
    Valid { header: Header },
    /// The header was rejected. `message` is the rendered diagnostic.
    Invalid { message: String, error: ParseError },
    /// The file could not be read.
    Unreadable { message: String },
}

impl LintStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, LintStatus::Valid { .. })
    }
}

/// Check result for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintOutcome {
    pub package: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: LintStatus,
}

/// Outcome of a lint run, one entry per package in name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    pub mode: ParseMode,
    pub outcomes: Vec<LintOutcome>,
}

impl LintReport {
    /// Number of packages whose header parsed.
    pub fn valid_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_valid()).count()
    }

    /// Number of packages that were rejected or unreadable.
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.valid_count()
    }

    /// Returns `true` when every package passed.
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// Outcomes that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &LintOutcome> {
        self.outcomes.iter().filter(|o| !o.status.is_valid())
    }
}

/// Reads and parses one header file.
pub fn check_file(path: &Path, mode: ParseMode) -> LintStatus {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read header file");
            return LintStatus::Unreadable {
                message: err.to_string(),
            };
        }
    };

    match parse_header(&text, mode) {
        Ok(header) => LintStatus::Valid { header },
        Err(error) => {
            debug!(path = %path.display(), %error, "header rejected");
            LintStatus::Invalid {
                message: error.to_string(),
                error,
            }
        }
    }
}

/// Checks every package on a pool of `jobs` threads.
///
/// Outcomes keep the order of `packages`.
pub fn check_files(packages: &[PackageEntry], mode: ParseMode, jobs: usize) -> LintReport {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
        .expect("failed to build rayon thread pool");

    let outcomes: Vec<LintOutcome> = pool.install(|| {
        packages
            .par_iter()
            .map(|package| LintOutcome {
                package: package.name.clone(),
                path: package.path.clone(),
                status: check_file(&package.path, mode),
            })
            .collect()
    });

    let report = LintReport {
        generated_at: Utc::now().to_rfc3339(),
        mode,
        outcomes,
    };
    info!(
        packages = report.outcomes.len(),
        failures = report.failure_count(),
        ?mode,
        jobs,
        "lint run finished"
    );
    report
}
