//! Column model

use serde::{Deserialize, Serialize};

use super::enums::ColumnType;

/// Column model representing one stored value of a table row
///
/// A column has a native type, nullability, and may be the table's primary
/// key. Foreign keys are kept at table level (see [`super::ForeignKey`]) and
/// name their column.
///
/// # Example
///
/// ```rust
/// use stored_schema::models::{ColumnDefinition, ColumnType};
///
/// let column = ColumnDefinition::new("name", ColumnType::Text);
/// assert!(!column.nullable);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,
    /// Native column type
    pub column_type: ColumnType,
    /// Whether the column allows NULL values (default: false)
    #[serde(default)]
    pub nullable: bool,
    /// Whether this column is the table's primary key (default: false)
    #[serde(default)]
    pub primary_key: bool,
}

impl ColumnDefinition {
    /// Create a required (`NOT NULL`) column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            primary_key: false,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults_from_json() {
        let column: ColumnDefinition =
            serde_json::from_str(r#"{"name": "title", "columnType": "text"}"#).unwrap();
        assert_eq!(column, ColumnDefinition::new("title", ColumnType::Text));
    }

    #[test]
    fn test_builder_flags() {
        let column = ColumnDefinition::new("id", ColumnType::Uuid).primary_key();
        assert!(column.primary_key);
        assert!(!column.nullable);
        let column = ColumnDefinition::new("note", ColumnType::Text).nullable(true);
        assert!(column.nullable);
    }
}
