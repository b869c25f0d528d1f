//! Foreign keys: relationships between tables

use serde::{Deserialize, Serialize};

use super::enums::{Cardinality, DeleteRule};

/// Foreign key from one column of a table to another table's column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    /// Referencing column in the owning table
    pub column: String,
    /// Referenced table name
    pub references_table: String,
    /// Referenced column (`id` or the synthetic row id)
    pub references_column: String,
    /// Applied to the referencing row when the referenced row is deleted
    pub on_delete: DeleteRule,
    pub cardinality: Cardinality,
    /// Whether the referencing column may be NULL
    #[serde(default)]
    pub optional: bool,
}

impl ForeignKey {
    pub fn new(
        column: impl Into<String>,
        references_table: impl Into<String>,
        references_column: impl Into<String>,
        on_delete: DeleteRule,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            column: column.into(),
            references_table: references_table.into(),
            references_column: references_column.into(),
            on_delete,
            cardinality,
            optional: false,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Whether the key points back at its own table
    pub fn is_self_reference(&self, table_name: &str) -> bool {
        self.references_table == table_name
    }
}
