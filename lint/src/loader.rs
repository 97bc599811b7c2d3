//! Discovery of header files under a definitions root.
//!
//! Two layouts are recognized:
//!
//! ```text
//! <root>/<package>/index.d.ts
//! <root>/types/<package>/index.d.ts
//! ```
//!
//! A root that itself contains the entry file is treated as a single
//! package named after the directory.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::LintConfig;
use crate::error::{LintError, Result};

/// Directory that holds package directories in the nested layout.
pub const TYPES_DIR: &str = "types";

/// One package directory and the header file found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Package directory name.
    pub name: String,
    /// Path of the entry file.
    pub path: PathBuf,
}

/// Packages found under one definitions root, sorted by name.
///
/// # Examples
///
/// ```no_run
/// use dts_header_lint::{DefinitionsRoot, LintConfig};
///
/// let root = DefinitionsRoot::scan("DefinitelyTyped", &LintConfig::default()).unwrap();
/// for package in root.packages() {
///     println!("{} -> {}", package.name, package.path.display());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DefinitionsRoot {
    root: PathBuf,
    packages: Vec<PackageEntry>,
}

impl DefinitionsRoot {
    /// Scans `root` for package directories containing the configured entry
    /// file. Excluded packages and hidden directories are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::IoError`] if a directory cannot be read, or
    /// [`LintError::NoHeaderFiles`] if no package has an entry file.
    pub fn scan(root: impl AsRef<Path>, config: &LintConfig) -> Result<Self> {
        let root = root.as_ref();
        let entry_file = config.entry_file.as_str();

        let own_entry = root.join(entry_file);
        if own_entry.is_file() {
            let name = root
                .canonicalize()?
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            debug!(package = %name, "root is a single package");
            return Ok(Self {
                root: root.to_path_buf(),
                packages: vec![PackageEntry {
                    name,
                    path: own_entry,
                }],
            });
        }

        let nested = root.join(TYPES_DIR);
        let base = if nested.is_dir() { nested } else { root.to_path_buf() };

        let mut packages = Vec::new();
        for entry in std::fs::read_dir(&base)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if config.is_excluded(&name) {
                debug!(package = %name, "excluded by config");
                continue;
            }

            let path = entry.path().join(entry_file);
            if path.is_file() {
                packages.push(PackageEntry { name, path });
            } else {
                warn!(package = %name, entry_file, "skipping directory without entry file");
            }
        }

        if packages.is_empty() {
            return Err(LintError::NoHeaderFiles(root.to_path_buf()));
        }
        packages.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            root: root.to_path_buf(),
            packages,
        })
    }

    /// The directory that was scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Packages found, sorted by name.
    pub fn packages(&self) -> &[PackageEntry] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn package(dir: &Path, name: &str, file: &str) {
        fs::create_dir_all(dir.join(name)).unwrap();
        fs::write(dir.join(name).join(file), "// Type definitions for x 1.0\n").unwrap();
    }

    #[test]
    fn test_scan_flat_layout_sorted() {
        let dir = tempfile::tempdir().unwrap();
        package(dir.path(), "zebra", "index.d.ts");
        package(dir.path(), "apple", "index.d.ts");

        let root = DefinitionsRoot::scan(dir.path(), &LintConfig::default()).unwrap();
        let names: Vec<_> = root.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["apple", "zebra"]);
        assert_eq!(root.packages()[0].path, dir.path().join("apple").join("index.d.ts"));
    }

    #[test]
    fn test_scan_nested_types_layout() {
        let dir = tempfile::tempdir().unwrap();
        package(&dir.path().join(TYPES_DIR), "react", "index.d.ts");

        let root = DefinitionsRoot::scan(dir.path(), &LintConfig::default()).unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root.packages()[0].name, "react");
        assert_eq!(root.root(), dir.path());
    }

    #[test]
    fn test_scan_skips_excluded_hidden_and_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        package(dir.path(), "kept", "index.d.ts");
        package(dir.path(), "skipped", "index.d.ts");
        package(dir.path(), ".git", "index.d.ts");
        package(dir.path(), "no-entry", "other.d.ts");
        fs::write(dir.path().join("README.md"), "readme").unwrap();

        let config = LintConfig {
            exclude: vec!["skipped".to_string()],
            ..LintConfig::default()
        };
        let root = DefinitionsRoot::scan(dir.path(), &config).unwrap();
        let names: Vec<_> = root.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["kept"]);
    }

    #[test]
    fn test_scan_custom_entry_file() {
        let dir = tempfile::tempdir().unwrap();
        package(dir.path(), "a", "main.d.ts");

        let config = LintConfig {
            entry_file: "main.d.ts".to_string(),
            ..LintConfig::default()
        };
        assert_eq!(DefinitionsRoot::scan(dir.path(), &config).unwrap().len(), 1);
        assert!(DefinitionsRoot::scan(dir.path(), &LintConfig::default()).is_err());
    }

    #[test]
    fn test_scan_single_package_root() {
        let dir = tempfile::tempdir().unwrap();
        package(dir.path(), "lodash", "index.d.ts");

        let root =
            DefinitionsRoot::scan(dir.path().join("lodash"), &LintConfig::default()).unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root.packages()[0].name, "lodash");
    }

    #[test]
    fn test_scan_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = DefinitionsRoot::scan(dir.path(), &LintConfig::default()).unwrap_err();
        assert!(matches!(err, LintError::NoHeaderFiles(_)));
        assert!(err.to_string().starts_with("no header files found under "));
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            DefinitionsRoot::scan(dir.path().join("missing"), &LintConfig::default()).unwrap_err();
        assert!(matches!(err, LintError::IoError(_)));
    }
}
