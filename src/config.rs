//! Configuration handling for the cleaning pipeline

use std::fs;
use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};
use crate::model::{ColumnKind, Table};

/// Default z-score threshold for outlier filtering
pub const DEFAULT_THRESHOLD: f64 = 3.0;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Declared conversion for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRule {
    /// Kind the column holds after conversion
    pub target: ColumnKind,
    /// chrono format strings tried in order (temporal targets only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,
}

impl ConversionRule {
    pub fn new(target: ColumnKind) -> Self {
        Self {
            target,
            formats: Vec::new(),
        }
    }

    /// Temporal conversion using the given chrono formats
    pub fn temporal<S: Into<String>>(formats: impl IntoIterator<Item = S>) -> Self {
        Self {
            target: ColumnKind::Temporal,
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ColumnKind> for ConversionRule {
    fn from(kind: ColumnKind) -> Self {
        Self::new(kind)
    }
}

/// Configuration for a cleaning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Ordered columns for outlier checking; `None` checks every numeric column
    #[serde(default)]
    pub numeric_columns: Option<Vec<String>>,
    /// z-score threshold; rows with |z| >= threshold are dropped
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Column conversions, applied in insertion order
    #[serde(default)]
    pub type_conversions: IndexMap<String, ConversionRule>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            numeric_columns: None,
            threshold: DEFAULT_THRESHOLD,
            type_conversions: IndexMap::new(),
        }
    }
}

impl CleaningConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ordered columns to check for outliers
    pub fn with_numeric_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.numeric_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the z-score threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Add a type conversion for a column
    pub fn with_conversion(
        mut self,
        column: impl Into<String>,
        rule: impl Into<ConversionRule>,
    ) -> Self {
        self.type_conversions.insert(column.into(), rule.into());
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Check the configuration against a table before any stage runs
    pub fn validate(&self, table: &Table) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(CleanError::InvalidConfiguration(format!(
                "threshold must be a finite non-negative number, got {}",
                self.threshold
            )));
        }

        for name in self.numeric_columns.iter().flatten() {
            let column = table.column(name).ok_or_else(|| {
                CleanError::InvalidConfiguration(format!("outlier column '{}' not found", name))
            })?;
            if !column.is_numeric() {
                return Err(CleanError::InvalidConfiguration(format!(
                    "outlier column '{}' is {}, not numeric",
                    name,
                    column.kind()
                )));
            }
        }

        for name in self.type_conversions.keys() {
            if table.column(name).is_none() {
                return Err(CleanError::InvalidConfiguration(format!(
                    "conversion column '{}' not found",
                    name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::Column;

    fn table() -> Table {
        Table::new(vec![
            Column::numeric("x", vec![Some(1.0)]),
            Column::categorical("name", vec![Some("a")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = CleaningConfig::default();
        assert_eq!(config.threshold, 3.0);
        assert!(config.numeric_columns.is_none());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        for threshold in [-1.0, f64::NAN, f64::INFINITY] {
            let config = CleaningConfig::new().with_threshold(threshold);
            assert!(matches!(
                config.validate(&table()),
                Err(CleanError::InvalidConfiguration(_))
            ));
        }
        assert!(CleaningConfig::new().with_threshold(0.0).validate(&table()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_or_non_numeric_columns() {
        let missing = CleaningConfig::new().with_numeric_columns(["nope"]);
        assert!(missing.validate(&table()).is_err());

        let categorical = CleaningConfig::new().with_numeric_columns(["name"]);
        let err = categorical.validate(&table()).unwrap_err();
        assert!(err.to_string().contains("not numeric"));

        let conversion = CleaningConfig::new().with_conversion("ghost", ColumnKind::Numeric);
        assert!(conversion.validate(&table()).is_err());
    }

    #[test]
    fn test_from_json() {
        let config = CleaningConfig::from_json_str(
            r#"{
                "numeric_columns": ["b", "a"],
                "type_conversions": {
                    "when": { "target": "temporal", "formats": ["%d/%m/%Y"] },
                    "code": { "target": "numeric" }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.numeric_columns, Some(vec!["b".into(), "a".into()]));
        let keys: Vec<_> = config.type_conversions.keys().cloned().collect();
        assert_eq!(keys, vec!["when".to_string(), "code".to_string()]);
        assert_eq!(
            config.type_conversions["when"],
            ConversionRule::temporal(["%d/%m/%Y"])
        );
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "threshold": 2.5 }}"#).unwrap();
        let config = CleaningConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.threshold, 2.5);

        let err = CleaningConfig::from_json_file(Path::new("/nonexistent/tabclean.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
