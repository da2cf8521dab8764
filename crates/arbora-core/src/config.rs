//! Layout configuration loaded from `.arbora.toml`.
//!
//! ```toml
//! weight_tolerance = 1e-9
//! max_column_nesting = 1
//! allow_nested_expanders = false
//! default_gap = "small"
//! ```

use crate::delta::Gap;
use crate::error::{LayoutError, Result};
use crate::weights::{MIN_WEIGHT_TOLERANCE, WEIGHT_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session-wide layout rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Absolute tolerance when checking that column weights sum to 1.0
    pub weight_tolerance: f64,
    /// How many levels of columns may be nested inside columns
    pub max_column_nesting: usize,
    /// Whether an expander may be placed inside another expander
    pub allow_nested_expanders: bool,
    /// Gap used when a `columns` call does not set one
    pub default_gap: Gap,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            weight_tolerance: WEIGHT_TOLERANCE,
            max_column_nesting: 1,
            allow_nested_expanders: false,
            default_gap: Gap::Small,
        }
    }
}

impl LayoutConfig {
    /// Default config file name.
    pub const CONFIG_FILE: &'static str = ".arbora.toml";

    /// Parse a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] if the TOML is invalid or a value is
    /// out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize the config to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load a config from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!(path = %path.display(), "loaded layout config");
        Ok(config)
    }

    /// Load `.arbora.toml` from `dir`, falling back to defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::CONFIG_FILE);
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<()> {
        if !self.weight_tolerance.is_finite() || self.weight_tolerance <= 0.0 {
            return Err(LayoutError::Config(format!(
                "weight_tolerance must be a positive number, got {}",
                self.weight_tolerance
            )));
        }
        if self.weight_tolerance < MIN_WEIGHT_TOLERANCE {
            return Err(LayoutError::Config(format!(
                "weight_tolerance must be at least {MIN_WEIGHT_TOLERANCE:e}, got {:e}",
                self.weight_tolerance
            )));
        }
        if self.weight_tolerance >= 1.0 {
            return Err(LayoutError::Config(
                "weight_tolerance must be below 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.weight_tolerance, 1e-9);
        assert_eq!(config.max_column_nesting, 1);
        assert!(!config.allow_nested_expanders);
        assert_eq!(config.default_gap, Gap::Small);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LayoutConfig::from_toml("default_gap = \"large\"").unwrap();
        assert_eq!(config.default_gap, Gap::Large);
        assert_eq!(config.max_column_nesting, 1);
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
weight_tolerance = 1e-6
max_column_nesting = 2
allow_nested_expanders = true
default_gap = "medium"
"#;
        let config = LayoutConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.weight_tolerance, 1e-6);
        assert_eq!(config.max_column_nesting, 2);
        assert!(config.allow_nested_expanders);
        assert_eq!(config.default_gap, Gap::Medium);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = LayoutConfig {
            max_column_nesting: 3,
            ..LayoutConfig::default()
        };
        let parsed = LayoutConfig::from_toml(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        for bad in [
            "weight_tolerance = 0.0",
            "weight_tolerance = -1.0",
            "weight_tolerance = 2.0",
            "weight_tolerance = 1e-17",
        ] {
            let err = LayoutConfig::from_toml(bad).unwrap_err();
            assert!(matches!(err, LayoutError::Config(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_accepts_min_tolerance() {
        let config = LayoutConfig::from_toml("weight_tolerance = 1e-12").unwrap();
        assert_eq!(config.weight_tolerance, MIN_WEIGHT_TOLERANCE);
    }

    #[test]
    fn test_rejects_unknown_gap() {
        let err = LayoutConfig::from_toml("default_gap = \"huge\"").unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LayoutConfig::CONFIG_FILE);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "max_column_nesting = 0").unwrap();

        let config = LayoutConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_column_nesting, 0);
        assert_eq!(LayoutConfig::load_or_default(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LayoutConfig::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
        assert_eq!(
            LayoutConfig::load_or_default(dir.path()).unwrap(),
            LayoutConfig::default()
        );
    }
}
