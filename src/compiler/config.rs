//! Configuration for relational compilation

use serde::{Deserialize, Serialize};

/// How a required reference between two non-identifiable composites is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnedReferenceLayout {
    /// Foreign-key column on the owner's table
    #[default]
    ForeignKey,
    /// Intermediate `{Owner}_{field}` table with one row per owner
    JoinTable,
}

/// Configuration for relational compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Name of the synthetic row id of tables without an `id` column
    pub row_id_column: String,

    /// Layout of required non-identifiable to non-identifiable references
    pub owned_reference_layout: OwnedReferenceLayout,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            row_id_column: "rowid".to_string(),
            owned_reference_layout: OwnedReferenceLayout::ForeignKey,
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> CompilerConfigBuilder {
        CompilerConfigBuilder::default()
    }
}

/// Builder for CompilerConfig
#[derive(Debug, Default)]
pub struct CompilerConfigBuilder {
    config: CompilerConfig,
}

impl CompilerConfigBuilder {
    /// Set the synthetic row id column name
    pub fn row_id_column(mut self, name: impl Into<String>) -> Self {
        self.config.row_id_column = name.into();
        self
    }

    /// Set the owned reference layout
    pub fn owned_reference_layout(mut self, layout: OwnedReferenceLayout) -> Self {
        self.config.owned_reference_layout = layout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CompilerConfig {
        self.config
    }
}
