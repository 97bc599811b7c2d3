//! Lint configuration.
//!
//! Defines the YAML-serializable configuration that controls which packages
//! are checked, the parse mode they are checked in, and parallelism.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! mode: strict
//! entry_file: index.d.ts
//! exclude:
//!   - some-package
//! jobs: 4
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use dts_header_core::ParseMode;

use crate::error::{LintError, Result};

/// Conventional file name of the configuration in a definitions root.
pub const DEFAULT_CONFIG_FILE: &str = ".dts-header.yml";

/// Top-level lint configuration.
///
/// Every field has a default, so a partial file (or none at all) is valid.
///
/// # Examples
///
/// ```
/// use dts_header_core::ParseMode;
/// use dts_header_lint::LintConfig;
///
/// let config: LintConfig = serde_yaml::from_str("exclude: [jquery]").unwrap();
/// assert_eq!(config.mode, ParseMode::Strict);
/// assert_eq!(config.entry_file, "index.d.ts");
/// assert!(config.is_excluded("jquery"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Rule set the headers are checked with.
    pub mode: ParseMode,
    /// File inside each package directory that carries the header.
    pub entry_file: String,
    /// Package directory names to skip.
    pub exclude: Vec<String>,
    /// Number of parallel parse jobs.
    pub jobs: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            mode: ParseMode::Strict,
            entry_file: "index.d.ts".to_string(),
            exclude: Vec::new(),
            jobs: 4,
        }
    }
}

impl LintConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::LintError::IoError) if the file cannot be
    /// read, [`YamlError`](crate::LintError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](crate::LintError::InvalidConfig) if a value is
    /// unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::LintError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::LintError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::LintError::InvalidConfig) for an
    /// empty `entry_file`, an `entry_file` that is not a bare file name, or
    /// `jobs: 0`.
    pub fn validate(&self) -> Result<()> {
        if self.entry_file.trim().is_empty() {
            return Err(LintError::InvalidConfig(
                "entry_file must not be empty".to_string(),
            ));
        }
        if self.entry_file.contains(['/', '\\']) {
            return Err(LintError::InvalidConfig(format!(
                "entry_file must be a file name, got '{}'",
                self.entry_file
            )));
        }
        if self.jobs == 0 {
            return Err(LintError::InvalidConfig(
                "jobs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns `true` if `package` is in the exclusion list.
    pub fn is_excluded(&self, package: &str) -> bool {
        self.exclude.iter().any(|p| p == package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
mode: lenient
entry_file: main.d.ts
exclude:
  - jquery
  - lodash
jobs: 8
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: LintConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.mode, ParseMode::Lenient);
        assert_eq!(config.entry_file, "main.d.ts");
        assert_eq!(config.exclude, vec!["jquery", "lodash"]);
        assert_eq!(config.jobs, 8);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: LintConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, LintConfig::default());
        assert_eq!(config.mode, ParseMode::Strict);
        assert_eq!(config.jobs, 4);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: std::result::Result<LintConfig, _> = serde_yaml::from_str("mode: sloppy");
        assert!(result.is_err());
    }

    #[test]
    fn test_is_excluded() {
        let config: LintConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert!(config.is_excluded("jquery"));
        assert!(!config.is_excluded("react"));
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let empty_entry = LintConfig {
            entry_file: " ".to_string(),
            ..LintConfig::default()
        };
        assert!(matches!(
            empty_entry.validate(),
            Err(LintError::InvalidConfig(_))
        ));

        let nested_entry = LintConfig {
            entry_file: "src/index.d.ts".to_string(),
            ..LintConfig::default()
        };
        assert!(nested_entry.validate().is_err());

        let no_jobs = LintConfig {
            jobs: 0,
            ..LintConfig::default()
        };
        let err = no_jobs.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid config: jobs must be at least 1");

        assert!(LintConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let original: LintConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = LintConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "jobs: 0\n").unwrap();

        assert!(matches!(
            LintConfig::load(&path),
            Err(LintError::InvalidConfig(_))
        ));
    }
}
