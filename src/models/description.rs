//! Type descriptions: how a declared type is stored

use std::collections::BTreeSet;

use crate::declared::{RecordRef, TypeKey};

use super::enums::PrimitiveType;

/// How one declared type is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescription {
    /// An atomic value
    Primitive(PrimitiveType),
    /// A nullable wrapper
    Optional(Box<TypeDescription>),
    /// A list, set or map
    MultiValue(MultiValueDescription),
    /// A reference to a composite record; resolve it through the schema
    Composite(RecordRef),
}

impl TypeDescription {
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDescription::Optional(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDescription::Primitive(_))
    }

    pub fn is_multi_value(&self) -> bool {
        matches!(self, TypeDescription::MultiValue(_))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeDescription::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// The composite this description stores directly, through an optional,
    /// or as the element of a collection.
    pub fn referenced_record(&self) -> Option<RecordRef> {
        match self {
            TypeDescription::Composite(record) => Some(*record),
            TypeDescription::Optional(inner) => inner.referenced_record(),
            TypeDescription::MultiValue(multi) => multi.value.referenced_record(),
            TypeDescription::Primitive(_) => None,
        }
    }

    fn collect_primitives(&self, into: &mut BTreeSet<PrimitiveType>) {
        match self {
            TypeDescription::Primitive(p) => {
                into.insert(*p);
            }
            TypeDescription::Optional(inner) => inner.collect_primitives(into),
            TypeDescription::MultiValue(multi) => {
                if let Some(key) = &multi.key {
                    key.collect_primitives(into);
                }
                multi.value.collect_primitives(into);
            }
            TypeDescription::Composite(_) => {}
        }
    }
}

/// A collection.
///
/// No key and ordered is a list, no key and unordered is a set, a key is a
/// map (maps are never ordered).
#[derive(Debug, Clone, PartialEq)]
pub struct MultiValueDescription {
    pub value: Box<TypeDescription>,
    pub key: Option<Box<TypeDescription>>,
    pub ordered: bool,
}

impl MultiValueDescription {
    pub fn list(value: TypeDescription) -> Self {
        Self {
            value: Box::new(value),
            key: None,
            ordered: true,
        }
    }

    pub fn set(value: TypeDescription) -> Self {
        Self {
            value: Box::new(value),
            key: None,
            ordered: false,
        }
    }

    pub fn map(key: TypeDescription, value: TypeDescription) -> Self {
        Self {
            value: Box::new(value),
            key: Some(Box::new(key)),
            ordered: false,
        }
    }

    pub fn is_list(&self) -> bool {
        self.key.is_none() && self.ordered
    }

    pub fn is_set(&self) -> bool {
        self.key.is_none() && !self.ordered
    }

    pub fn is_map(&self) -> bool {
        self.key.is_some()
    }
}

/// A classified field of a composite.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// `Owner.field`
    pub path: String,
    /// Host name of the declared field type
    pub type_name: String,
    pub description: TypeDescription,
}

/// A validated composite record type.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeDescription {
    pub key: TypeKey,
    pub name: String,
    pub fields: Vec<Field>,
    pub identifiable: bool,
}

impl CompositeDescription {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The `id` field's primitive type, when the composite is identifiable
    pub fn identifier(&self) -> Option<PrimitiveType> {
        if !self.identifiable {
            return None;
        }
        self.field(crate::validation::IDENTIFIER_FIELD)
            .and_then(|f| f.description.as_primitive())
    }

    /// Composite records referenced by this composite's fields, in field order
    pub fn referenced_records(&self) -> Vec<RecordRef> {
        self.fields
            .iter()
            .filter_map(|f| f.description.referenced_record())
            .collect()
    }

    pub(crate) fn primitive_types(&self, into: &mut BTreeSet<PrimitiveType>) {
        for field in &self.fields {
            field.description.collect_primitives(into);
        }
    }
}
