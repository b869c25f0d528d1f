//! Stored Schema - compile host record types into relational table definitions
//!
//! Provides:
//! - Declared types (primitive registry, wrappers, record descriptions)
//! - Field classification and validation
//! - Schema building (worklist traversal with deduplication by type identity)
//! - Relational compilation (base tables, join tables, foreign keys and delete rules)
//! - Reference exporters (SQL DDL, JSON)

pub mod classify;
pub mod compiler;
pub mod declared;
pub mod export;
pub mod models;
pub mod schema;
pub mod validation;

// Re-export commonly used types
pub use classify::{UnsupportedType, classify, describe_record};
pub use compiler::{CompileError, CompilerConfig, OwnedReferenceLayout, RelationalCompiler};
pub use declared::{DeclaredType, FieldSet, RecordRef, StoredRecord, StoredType, TypeKey};
pub use export::{ExportError, ExportResult, JSONExporter, SQLExporter};
pub use schema::{
    DescriptionCache, FieldContext, Schema, SchemaBuilder, SchemaConfig, SchemaError,
};
pub use validation::{RelationshipValidationError, creation_order};

// Re-export models
pub use models::enums::*;
pub use models::{
    ColumnDefinition, CompositeDescription, Field, ForeignKey, MultiValueDescription, RowIdentity,
    TableDefinition, TypeDescription, UniqueConstraint,
};
