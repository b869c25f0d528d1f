//! Validation functionality
//!
//! Provides validation logic for:
//! - Field validation (reserved names, optional and multi-value nesting, map keys)
//! - Composite validation (value semantics, emptiness, identity)
//! - Table validation (naming conflicts)
//! - Relationship validation (creation order, circular references)

pub mod composite;
pub mod fields;
pub mod relationships;
pub mod tables;

/// Name of the identity field of identifiable types
pub const IDENTIFIER_FIELD: &str = "id";

pub use relationships::{RelationshipValidationError, creation_order};
pub use tables::{NamingConflict, TableNameRegistry, TableValidator};
