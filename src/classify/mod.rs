//! Field classification
//!
//! Turns declared types into type descriptions. Wrappers classify their
//! inner types recursively; records classify to a shallow composite
//! reference, so describing one record never describes another. The schema
//! builder walks those references.

use thiserror::Error;
use tracing::trace;

use crate::declared::{DeclaredType, FieldDeclaration, RecordRef};
use crate::models::{CompositeDescription, Field, MultiValueDescription, TypeDescription};
use crate::schema::{FieldContext, SchemaConfig, SchemaError};
use crate::validation::composite::{validate_identity, validate_not_empty, validate_value_type};
use crate::validation::fields::{validate_field_name, validate_field_shape};

/// A declared type with no storage mapping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported type: {type_name}")]
pub struct UnsupportedType {
    pub type_name: String,
}

/// Classify a declared type
pub fn classify(declared: &DeclaredType) -> Result<TypeDescription, UnsupportedType> {
    let description = match declared {
        DeclaredType::Primitive(primitive) => TypeDescription::Primitive(*primitive),
        DeclaredType::Optional(inner) => TypeDescription::Optional(Box::new(classify(inner)?)),
        DeclaredType::List(element) => {
            TypeDescription::MultiValue(MultiValueDescription::list(classify(element)?))
        }
        DeclaredType::Set(element) => {
            TypeDescription::MultiValue(MultiValueDescription::set(classify(element)?))
        }
        DeclaredType::Map { key, value } => TypeDescription::MultiValue(
            MultiValueDescription::map(classify(key)?, classify(value)?),
        ),
        DeclaredType::Record(record) => TypeDescription::Composite(*record),
        // stored as whatever its raw value is stored as
        DeclaredType::RawValue { raw, .. } => classify(raw)?,
        DeclaredType::Opaque { name } => {
            return Err(UnsupportedType {
                type_name: name.to_string(),
            });
        }
    };
    Ok(description)
}

/// Classify one field of `owner`
pub fn classify_field(owner: &str, declaration: &FieldDeclaration) -> Result<Field, SchemaError> {
    let description = classify(&declaration.declared).map_err(|_| {
        SchemaError::UnknownFieldType(FieldContext::new(
            owner,
            &declaration.name,
            &declaration.type_name,
        ))
    })?;

    Ok(Field {
        name: declaration.name.clone(),
        path: format!("{}.{}", owner, declaration.name),
        type_name: declaration.type_name.clone(),
        description,
    })
}

/// Classify and validate one composite record.
///
/// Checks run in this order: value semantics; then per field, in
/// declaration order, the reserved-name check and classification; then
/// emptiness; then identity; then per-field nesting and key rules.
pub fn describe_record(
    record: &RecordRef,
    config: &SchemaConfig,
) -> Result<CompositeDescription, SchemaError> {
    let shape = record.shape();
    validate_value_type(&shape)?;

    let mut fields = Vec::with_capacity(shape.fields.len());
    for declaration in &shape.fields {
        validate_field_name(shape.name, declaration, config)?;
        fields.push(classify_field(shape.name, declaration)?);
    }

    validate_not_empty(shape.name, &fields)?;
    validate_identity(shape.name, shape.identifiable, &fields)?;
    for field in &fields {
        validate_field_shape(shape.name, field)?;
    }

    trace!(
        "Described {} ({} fields, identifiable: {})",
        shape.name,
        fields.len(),
        shape.identifiable
    );

    Ok(CompositeDescription {
        key: record.key(),
        name: shape.name.to_string(),
        fields,
        identifiable: shape.identifiable,
    })
}
