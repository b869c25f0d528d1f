//! Field validation
//!
//! Per-field legality checks. Name checks run on declarations, before
//! classification; shape checks run on classified fields.

use crate::declared::FieldDeclaration;
use crate::models::{Field, TypeDescription};
use crate::schema::{FieldContext, SchemaConfig, SchemaError};

/// Reject names reserved for synthetic columns (case-insensitive)
pub fn validate_field_name(
    owner: &str,
    declaration: &FieldDeclaration,
    config: &SchemaConfig,
) -> Result<(), SchemaError> {
    if config.is_reserved(&declaration.name) {
        return Err(SchemaError::InvalidFieldName(FieldContext::new(
            owner,
            &declaration.name,
            &declaration.type_name,
        )));
    }
    Ok(())
}

/// Check optional nesting, multi-value nesting and map key rules
pub fn validate_field_shape(owner: &str, field: &Field) -> Result<(), SchemaError> {
    let context = || FieldContext::new(owner, &field.name, &field.type_name);

    if let TypeDescription::Optional(wrapped) = &field.description {
        match wrapped.as_ref() {
            TypeDescription::MultiValue(_) => {
                return Err(SchemaError::MultiValueFieldsCannotBeOptional(context()));
            }
            TypeDescription::Optional(_) => {
                return Err(SchemaError::OptionalFieldCannotNestOptional(context()));
            }
            _ => {}
        }
    }

    if let TypeDescription::MultiValue(multi) = &field.description {
        // e.g. lists of lists
        match multi.value.as_ref() {
            TypeDescription::MultiValue(_) => {
                return Err(SchemaError::MultiValueFieldsCannotBeNested(context()));
            }
            TypeDescription::Optional(_) => {
                return Err(SchemaError::MultiValueFieldsCannotNestOptionals(context()));
            }
            _ => {}
        }

        if let Some(key) = &multi.key {
            if key.is_optional() {
                return Err(SchemaError::DictionaryKeyCannotBeOptional(context()));
            }
            if !key.is_primitive() {
                return Err(SchemaError::DictionaryKeyMustBePrimitive(context()));
            }
        }
    }

    Ok(())
}
