//! Declared types
//!
//! The host-facing side of the compiler. A declared type is what a field says
//! it holds, before any classification has happened:
//! - Primitive host types registered through [`StoredType`]
//! - Wrappers (optional, list, set, map) over other declared types
//! - Records, described lazily through [`StoredRecord`]
//!
//! Nothing here validates anything. Classification and validation live in
//! [`crate::classify`] and [`crate::validation`].

mod primitives;
mod record;

use std::any::TypeId;
use std::fmt;

use crate::models::PrimitiveType;

pub use primitives::{Binary, Encoded};
pub use record::{FieldDeclaration, FieldSet, RecordRef, RecordShape, StoredRecord};

/// Stable identity of a declared type.
///
/// The schema builder deduplicates by this key, never by name, so two
/// distinct types that happen to share a name stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(TypeId);

impl TypeKey {
    /// Key of the Rust type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(TypeId::of::<T>())
    }
}

/// A type as declared by a field, prior to classification.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    /// A registered primitive host type
    Primitive(PrimitiveType),
    /// A nullable wrapper
    Optional(Box<DeclaredType>),
    /// An ordered collection
    List(Box<DeclaredType>),
    /// An unordered collection without duplicates
    Set(Box<DeclaredType>),
    /// A keyed collection
    Map {
        key: Box<DeclaredType>,
        value: Box<DeclaredType>,
    },
    /// A composite record type
    Record(RecordRef),
    /// A type stored as its raw value (newtypes, string-backed enums)
    RawValue {
        name: &'static str,
        raw: Box<DeclaredType>,
    },
    /// A type with no storage mapping
    Opaque { name: &'static str },
}

impl DeclaredType {
    pub fn optional(inner: DeclaredType) -> Self {
        DeclaredType::Optional(Box::new(inner))
    }

    pub fn list(element: DeclaredType) -> Self {
        DeclaredType::List(Box::new(element))
    }

    pub fn set(element: DeclaredType) -> Self {
        DeclaredType::Set(Box::new(element))
    }

    pub fn map(key: DeclaredType, value: DeclaredType) -> Self {
        DeclaredType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Declared type of a record `T`
    pub fn record<T: StoredRecord>() -> Self {
        DeclaredType::Record(RecordRef::of::<T>())
    }

    /// A type named `name` that is stored as the raw type `R`
    pub fn raw_value<R: StoredType>(name: &'static str) -> Self {
        DeclaredType::RawValue {
            name,
            raw: Box::new(R::declared_type()),
        }
    }

    /// A type the host can enumerate but which has no storage mapping
    pub fn opaque<T: ?Sized>() -> Self {
        DeclaredType::Opaque {
            name: std::any::type_name::<T>(),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Primitive(p) => write!(f, "{}", p),
            DeclaredType::Optional(inner) => write!(f, "Optional<{}>", inner),
            DeclaredType::List(element) => write!(f, "List<{}>", element),
            DeclaredType::Set(element) => write!(f, "Set<{}>", element),
            DeclaredType::Map { key, value } => write!(f, "Map<{}, {}>", key, value),
            DeclaredType::Record(record) => f.write_str(record.name()),
            DeclaredType::RawValue { name, .. } => f.write_str(name),
            DeclaredType::Opaque { name } => f.write_str(name),
        }
    }
}

/// A host type that can appear as a stored field.
///
/// Implementations form the closed primitive registry (see `primitives`), the
/// collection wrappers, and every [`StoredRecord`].
pub trait StoredType: 'static {
    fn declared_type() -> DeclaredType;
}
