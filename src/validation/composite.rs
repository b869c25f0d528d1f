//! Composite validation
//!
//! Type-level rules: value semantics, at least one stored field, and the
//! identity rules tying `is_identifiable` to an `id` field.

use super::IDENTIFIER_FIELD;
use crate::declared::RecordShape;
use crate::models::Field;
use crate::schema::{FieldContext, SchemaError};

pub fn validate_value_type(shape: &RecordShape) -> Result<(), SchemaError> {
    if !shape.value_type {
        return Err(SchemaError::StoredTypeMustBeValueType {
            type_name: shape.name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_not_empty(type_name: &str, fields: &[Field]) -> Result<(), SchemaError> {
    if fields.is_empty() {
        return Err(SchemaError::StoredTypeIsEmpty {
            type_name: type_name.to_string(),
        });
    }
    Ok(())
}

/// An `id` field requires an identifiable type, must be required and primitive;
/// an identifiable type requires an `id` field.
pub fn validate_identity(
    type_name: &str,
    identifiable: bool,
    fields: &[Field],
) -> Result<(), SchemaError> {
    match fields.iter().find(|f| f.name == IDENTIFIER_FIELD) {
        Some(id) => {
            let context = || FieldContext::new(type_name, &id.name, &id.type_name);
            if !identifiable {
                return Err(SchemaError::StoredTypeIsNotIdentifiable(context()));
            }
            if id.description.is_optional() {
                return Err(SchemaError::IdentifierCannotBeOptional(context()));
            }
            if !id.description.is_primitive() {
                return Err(SchemaError::IdentifierMustBePrimitive(context()));
            }
            Ok(())
        }
        None if identifiable => Err(SchemaError::StoredTypeMissingIdentifier {
            type_name: type_name.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MultiValueDescription, PrimitiveType, TypeDescription};

    fn id(description: TypeDescription) -> Field {
        Field {
            name: "id".to_string(),
            path: "S.id".to_string(),
            type_name: "test".to_string(),
            description,
        }
    }

    #[test]
    fn test_identity_matrix() {
        let primitive = id(TypeDescription::Primitive(PrimitiveType::Uuid));
        assert!(validate_identity("S", true, std::slice::from_ref(&primitive)).is_ok());
        assert!(matches!(
            validate_identity("S", false, &[primitive]),
            Err(SchemaError::StoredTypeIsNotIdentifiable(_))
        ));
        assert!(matches!(
            validate_identity("S", true, &[]),
            Err(SchemaError::StoredTypeMissingIdentifier { .. })
        ));
        assert!(validate_identity("S", false, &[]).is_ok());
    }

    #[test]
    fn test_identifier_shape() {
        let optional = id(TypeDescription::Optional(Box::new(TypeDescription::Primitive(
            PrimitiveType::String,
        ))));
        assert!(matches!(
            validate_identity("S", true, &[optional]),
            Err(SchemaError::IdentifierCannotBeOptional(_))
        ));

        let list = id(TypeDescription::MultiValue(MultiValueDescription::list(
            TypeDescription::Primitive(PrimitiveType::Int64),
        )));
        assert!(matches!(
            validate_identity("S", true, &[list]),
            Err(SchemaError::IdentifierMustBePrimitive(_))
        ));
    }

    #[test]
    fn test_empty_and_reference_types() {
        assert!(matches!(
            validate_not_empty("S", &[]),
            Err(SchemaError::StoredTypeIsEmpty { .. })
        ));
        let shape = RecordShape {
            name: "Shared",
            identifiable: false,
            value_type: false,
            fields: Vec::new(),
        };
        assert_eq!(
            validate_value_type(&shape),
            Err(SchemaError::StoredTypeMustBeValueType {
                type_name: "Shared".to_string()
            })
        );
    }
}
