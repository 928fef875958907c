//! Table configuration.
//!
//! Column typing and the sortable/filterable switches can be supplied as
//! JSON or YAML:
//!
//! ```yaml
//! default_type: infer
//! columns:
//!   - type: text
//!   - sortable: false
//!   - type: infer
//!     filterable: false
//! ```
//!
//! Columns beyond the listed ones use `default_type` and are sortable and
//! filterable.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::value::ColumnType;

/// Per-column settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Column type; falls back to the table's default type when absent.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    /// Whether the column contributes a sort descriptor.
    pub sortable: bool,
    /// Whether the column contributes a filter descriptor.
    pub filterable: bool,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            column_type: None,
            sortable: true,
            filterable: true,
        }
    }
}

impl ColumnConfig {
    /// Creates a sortable, filterable column of the given type.
    pub fn typed(column_type: ColumnType) -> Self {
        ColumnConfig {
            column_type: Some(column_type),
            ..Default::default()
        }
    }
}

/// Settings for a whole table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Type of columns without an explicit type.
    pub default_type: ColumnType,
    /// Settings by column index.
    pub columns: Vec<ColumnConfig>,
}

impl TableConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| TableError::Config(e.to_string()))
    }

    /// Parses a configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| TableError::Config(e.to_string()))
    }

    /// Settings for `column`, with the type resolved.
    pub fn column(&self, column: usize) -> ColumnConfig {
        let mut config = self.columns.get(column).cloned().unwrap_or_default();
        config.column_type = Some(config.column_type.unwrap_or(self.default_type));
        config
    }

    /// Resolved type of `column`.
    pub fn column_type(&self, column: usize) -> ColumnType {
        self.columns
            .get(column)
            .and_then(|c| c.column_type)
            .unwrap_or(self.default_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_config() {
        let config = TableConfig::from_yaml(
            "default_type: text\ncolumns:\n  - type: infer\n  - sortable: false\n",
        )
        .unwrap();
        assert_eq!(config.column_type(0), ColumnType::Infer);
        assert_eq!(config.column_type(1), ColumnType::Text);
        assert!(!config.column(1).sortable);
        assert!(config.column(1).filterable);
        // unlisted column
        assert_eq!(config.column(7), ColumnConfig::typed(ColumnType::Text));
    }

    #[test]
    fn json_config() {
        let config =
            TableConfig::from_json(r#"{"columns": [{"type": "text", "filterable": false}]}"#)
                .unwrap();
        assert_eq!(config.default_type, ColumnType::Infer);
        assert_eq!(config.column_type(0), ColumnType::Text);
        assert!(!config.column(0).filterable);
    }

    #[test]
    fn empty_config_defaults() {
        let config = TableConfig::from_json("{}").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.column(0), ColumnConfig::typed(ColumnType::Infer));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let err = TableConfig::from_json(r#"{"default_type": "number"}"#).unwrap_err();
        assert!(matches!(err, TableError::Config(_)));
        assert!(TableConfig::from_yaml("columns: 3").is_err());
    }

    #[test]
    fn config_serializes_back() {
        let config = TableConfig {
            default_type: ColumnType::Text,
            columns: vec![ColumnConfig::default()],
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"default_type":"text","columns":[{"sortable":true,"filterable":true}]}"#
        );
    }
}
