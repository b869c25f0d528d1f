//! Error types for relational compilation

use thiserror::Error;

/// Error during relational compilation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A field references a composite that is not part of the schema
    #[error("Unresolved composite: {field} references {type_name}, which is not in the schema")]
    UnresolvedComposite { field: String, type_name: String },

    /// A field shape that schema validation rejects
    #[error("Unsupported field shape: {field} ({type_name})")]
    UnsupportedFieldShape { field: String, type_name: String },

    /// A field of a table without `id`, or a fixed join table column, has
    /// the synthetic row id's name
    #[error("Field {field} conflicts with the synthetic row id column {column}")]
    RowIdColumnConflict { field: String, column: String },

    #[error("Duplicate table name: {name} is derived by {existing} and {incoming}")]
    DuplicateTableName {
        name: String,
        existing: String,
        incoming: String,
    },
}
