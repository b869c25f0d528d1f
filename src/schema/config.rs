//! Configuration for schema construction

use serde::{Deserialize, Serialize};

/// Configuration for schema construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaConfig {
    /// Field names reserved for the compiler's synthetic columns,
    /// compared case-insensitively
    pub reserved_field_names: Vec<String>,

    /// Reject two distinct types that derive the same table name.
    /// When false the collision is logged and left to the compiler.
    pub reject_name_collisions: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            reserved_field_names: vec!["rowid".to_string()],
            reject_name_collisions: true,
        }
    }
}

impl SchemaConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> SchemaConfigBuilder {
        SchemaConfigBuilder::default()
    }

    pub fn is_reserved(&self, field_name: &str) -> bool {
        self.reserved_field_names
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(field_name))
    }
}

/// Builder for SchemaConfig
#[derive(Debug, Default)]
pub struct SchemaConfigBuilder {
    config: SchemaConfig,
}

impl SchemaConfigBuilder {
    /// Reserve an additional field name
    pub fn reserve_field_name(mut self, name: impl Into<String>) -> Self {
        self.config.reserved_field_names.push(name.into());
        self
    }

    /// Set whether table name collisions are rejected
    pub fn reject_name_collisions(mut self, reject: bool) -> Self {
        self.config.reject_name_collisions = reject;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SchemaConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert!(config.is_reserved("rowid"));
        assert!(config.is_reserved("ROWID"));
        assert!(config.is_reserved("RowId"));
        assert!(!config.is_reserved("row_id"));
        assert!(config.reject_name_collisions);
    }

    #[test]
    fn test_builder() {
        let config = SchemaConfig::builder()
            .reserve_field_name("oid")
            .reject_name_collisions(false)
            .build();
        assert!(config.is_reserved("OID"));
        assert!(config.is_reserved("rowid"));
        assert!(!config.reject_name_collisions);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SchemaConfig =
            serde_json::from_str(r#"{"rejectNameCollisions": false}"#).unwrap();
        assert!(!config.reject_name_collisions);
        assert_eq!(config.reserved_field_names, vec!["rowid".to_string()]);
    }
}
