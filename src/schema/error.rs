//! Error types for schema construction

use std::fmt;

use thiserror::Error;

/// Where a field-level violation happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    /// Owning composite type
    pub type_name: String,
    pub field_name: String,
    /// `Owner.field`
    pub field_path: String,
    /// Host name of the field's declared type
    pub declared_type: String,
}

impl FieldContext {
    pub fn new(type_name: &str, field_name: &str, declared_type: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
            field_path: format!("{}.{}", type_name, field_name),
            declared_type: declared_type.to_string(),
        }
    }
}

impl fmt::Display for FieldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field_path, self.declared_type)
    }
}

/// Structural violations found while building a schema.
///
/// Construction stops at the first violation, in field-declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Field type is neither a registered primitive, a record, nor a wrapper over those
    #[error("Unknown field type: {0}")]
    UnknownFieldType(FieldContext),

    /// Field uses a name reserved for the synthetic row identity
    #[error("Invalid field name: {0} uses a reserved name")]
    InvalidFieldName(FieldContext),

    #[error("Stored type {type_name} must be a value type")]
    StoredTypeMustBeValueType { type_name: String },

    #[error("Stored type {type_name} has no stored fields")]
    StoredTypeIsEmpty { type_name: String },

    /// Type declares an `id` field without being identifiable
    #[error("Stored type {owner} declares an identifier but is not identifiable: {0}", owner = .0.type_name)]
    StoredTypeIsNotIdentifiable(FieldContext),

    /// Type is identifiable but declares no `id` field
    #[error("Stored type {type_name} is identifiable but has no id field")]
    StoredTypeMissingIdentifier { type_name: String },

    #[error("Identifier cannot be optional: {0}")]
    IdentifierCannotBeOptional(FieldContext),

    #[error("Identifier must be primitive: {0}")]
    IdentifierMustBePrimitive(FieldContext),

    #[error("Optional field cannot nest another optional: {0}")]
    OptionalFieldCannotNestOptional(FieldContext),

    #[error("Multi-value field cannot be optional: {0}")]
    MultiValueFieldsCannotBeOptional(FieldContext),

    #[error("Multi-value fields cannot be nested: {0}")]
    MultiValueFieldsCannotBeNested(FieldContext),

    #[error("Multi-value fields cannot hold optional values: {0}")]
    MultiValueFieldsCannotNestOptionals(FieldContext),

    #[error("Dictionary key cannot be optional: {0}")]
    DictionaryKeyCannotBeOptional(FieldContext),

    #[error("Dictionary key must be primitive: {0}")]
    DictionaryKeyMustBePrimitive(FieldContext),

    /// Two distinct declared types derive the same table name
    #[error("Table name collision: {name} is derived by {existing} and {incoming}")]
    TableNameCollision {
        name: String,
        existing: String,
        incoming: String,
    },
}

impl SchemaError {
    /// The offending composite type
    pub fn type_name(&self) -> &str {
        match self {
            SchemaError::StoredTypeMustBeValueType { type_name }
            | SchemaError::StoredTypeIsEmpty { type_name }
            | SchemaError::StoredTypeMissingIdentifier { type_name } => type_name,
            SchemaError::TableNameCollision { incoming, .. } => incoming,
            other => other
                .field()
                .map(|context| context.type_name.as_str())
                .unwrap_or_default(),
        }
    }

    /// Field context, for field-level violations
    pub fn field(&self) -> Option<&FieldContext> {
        match self {
            SchemaError::UnknownFieldType(context)
            | SchemaError::InvalidFieldName(context)
            | SchemaError::StoredTypeIsNotIdentifiable(context)
            | SchemaError::IdentifierCannotBeOptional(context)
            | SchemaError::IdentifierMustBePrimitive(context)
            | SchemaError::OptionalFieldCannotNestOptional(context)
            | SchemaError::MultiValueFieldsCannotBeOptional(context)
            | SchemaError::MultiValueFieldsCannotBeNested(context)
            | SchemaError::MultiValueFieldsCannotNestOptionals(context)
            | SchemaError::DictionaryKeyCannotBeOptional(context)
            | SchemaError::DictionaryKeyMustBePrimitive(context) => Some(context),
            SchemaError::StoredTypeMustBeValueType { .. }
            | SchemaError::StoredTypeIsEmpty { .. }
            | SchemaError::StoredTypeMissingIdentifier { .. }
            | SchemaError::TableNameCollision { .. } => None,
        }
    }
}
