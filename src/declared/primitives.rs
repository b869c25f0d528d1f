//! Primitive registry and collection wrappers

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DeclaredType, StoredType};
use crate::models::PrimitiveType;

/// A binary blob.
///
/// `Vec<u8>` declares a list of `u8`; wrap bytes in `Binary` to store them
/// as a single column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Binary(pub Vec<u8>);

/// A value stored as an opaque serialized blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Encoded<T>(pub T);

macro_rules! primitive {
    ($($ty:ty => $primitive:ident),* $(,)?) => {
        $(
            impl StoredType for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Primitive(PrimitiveType::$primitive)
                }
            }
        )*
    };
}

primitive! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    usize => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Binary => Binary,
    Uuid => Uuid,
    DateTime<Utc> => Timestamp,
    NaiveDateTime => Timestamp,
}

impl<T: 'static> StoredType for Encoded<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Primitive(PrimitiveType::Encoded)
    }
}

impl<T: StoredType> StoredType for Option<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::optional(T::declared_type())
    }
}

impl<T: StoredType> StoredType for Vec<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::list(T::declared_type())
    }
}

impl<T: StoredType> StoredType for VecDeque<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::list(T::declared_type())
    }
}

impl<T: StoredType, S: 'static> StoredType for HashSet<T, S> {
    fn declared_type() -> DeclaredType {
        DeclaredType::set(T::declared_type())
    }
}

impl<T: StoredType> StoredType for BTreeSet<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::set(T::declared_type())
    }
}

impl<K: StoredType, V: StoredType, S: 'static> StoredType for HashMap<K, V, S> {
    fn declared_type() -> DeclaredType {
        DeclaredType::map(K::declared_type(), V::declared_type())
    }
}

// BTreeMap iteration order is a storage detail; the field still has map semantics.
impl<K: StoredType, V: StoredType> StoredType for BTreeMap<K, V> {
    fn declared_type() -> DeclaredType {
        DeclaredType::map(K::declared_type(), V::declared_type())
    }
}
