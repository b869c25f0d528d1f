//! Table model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::column::ColumnDefinition;
use super::enums::{ColumnType, TableKind};
use super::relationship::ForeignKey;

/// How rows of a table are identified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum RowIdentity {
    /// The composite's own `id` column
    Identifier {
        column: String,
        column_type: ColumnType,
    },
    /// An engine-managed integer row id that is not part of the column list
    Synthetic { column: String },
}

impl RowIdentity {
    pub fn column(&self) -> &str {
        match self {
            RowIdentity::Identifier { column, .. } | RowIdentity::Synthetic { column } => column,
        }
    }

    /// Type of a column that references this identity
    pub fn column_type(&self) -> ColumnType {
        match self {
            RowIdentity::Identifier { column_type, .. } => *column_type,
            RowIdentity::Synthetic { .. } => ColumnType::BigInt,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, RowIdentity::Synthetic { .. })
    }
}

/// A set of columns whose combined values are unique per row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UniqueConstraint {
    pub columns: Vec<String>,
}

impl UniqueConstraint {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Engine-agnostic table definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    pub name: String,
    pub kind: TableKind,
    /// Composite type this table was derived from
    pub source_type: String,
    /// Field that produced a join table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_field: Option<String>,
    pub row_identity: RowIdentity,
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    pub unique_constraints: Vec<UniqueConstraint>,
}

impl TableDefinition {
    /// Base table of a composite type
    pub fn entity(name: impl Into<String>, row_identity: RowIdentity) -> Self {
        let name = name.into();
        Self {
            source_type: name.clone(),
            name,
            kind: TableKind::Entity,
            source_field: None,
            row_identity,
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            unique_constraints: Vec::new(),
        }
    }

    /// Intermediate table for `owner.field`
    pub fn join(owner: &str, field: &str, row_id_column: &str) -> Self {
        Self {
            name: join_table_name(owner, field),
            kind: TableKind::Join,
            source_type: owner.to_string(),
            source_field: Some(field.to_string()),
            row_identity: RowIdentity::Synthetic {
                column: row_id_column.to_string(),
            },
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            unique_constraints: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn foreign_key(&self, column: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.column == column)
    }

    pub fn add_column(&mut self, column: ColumnDefinition) {
        self.columns.push(column);
    }

    /// Add the referencing column together with its key
    pub fn add_foreign_key(&mut self, column: ColumnDefinition, foreign_key: ForeignKey) {
        self.columns.push(column);
        self.foreign_keys.push(foreign_key);
    }

    pub fn add_unique(&mut self, constraint: UniqueConstraint) {
        self.unique_constraints.push(constraint);
    }

    /// Deterministic UUID v5 for this table, stable across runs
    pub fn table_id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.name.as_bytes())
    }
}

/// Name of the intermediate table for `owner.field`
pub fn join_table_name(owner: &str, field: &str) -> String {
    format!("{}_{}", owner, field)
}
