//! Closed enumerations shared by descriptions and table definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Atomic stored value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Binary,
    Timestamp,
    Uuid,
    /// Opaque serialized blob
    Encoded,
}

impl PrimitiveType {
    /// Native column type for this primitive.
    ///
    /// Unsigned integers widen to the next signed width; `UInt64` shares
    /// `BigInt` with `Int64`.
    pub fn column_type(self) -> ColumnType {
        match self {
            PrimitiveType::Bool => ColumnType::Boolean,
            PrimitiveType::Int8 | PrimitiveType::Int16 | PrimitiveType::UInt8 => {
                ColumnType::SmallInt
            }
            PrimitiveType::Int32 | PrimitiveType::UInt16 => ColumnType::Integer,
            PrimitiveType::Int64 | PrimitiveType::UInt32 | PrimitiveType::UInt64 => {
                ColumnType::BigInt
            }
            PrimitiveType::Float32 => ColumnType::Real,
            PrimitiveType::Float64 => ColumnType::Double,
            PrimitiveType::String => ColumnType::Text,
            PrimitiveType::Binary | PrimitiveType::Encoded => ColumnType::Blob,
            PrimitiveType::Timestamp => ColumnType::Timestamp,
            PrimitiveType::Uuid => ColumnType::Uuid,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Bool => "Bool",
            PrimitiveType::Int8 => "Int8",
            PrimitiveType::Int16 => "Int16",
            PrimitiveType::Int32 => "Int32",
            PrimitiveType::Int64 => "Int64",
            PrimitiveType::UInt8 => "UInt8",
            PrimitiveType::UInt16 => "UInt16",
            PrimitiveType::UInt32 => "UInt32",
            PrimitiveType::UInt64 => "UInt64",
            PrimitiveType::Float32 => "Float32",
            PrimitiveType::Float64 => "Float64",
            PrimitiveType::String => "String",
            PrimitiveType::Binary => "Binary",
            PrimitiveType::Timestamp => "Timestamp",
            PrimitiveType::Uuid => "Uuid",
            PrimitiveType::Encoded => "Encoded",
        };
        f.write_str(name)
    }
}

/// Engine-agnostic column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Text,
    Blob,
    Timestamp,
    Uuid,
}

/// What happens to a referencing row when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeleteRule {
    /// Delete the referencing row too
    Cascade,
    /// Refuse to delete the referenced row while it is referenced
    Deny,
    /// Null out the referencing column
    SetNull,
}

/// Cardinality of a relationship, read from the referencing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
    /// The referenced row belongs to exactly one referencing row
    OneToOne,
    /// Many referencing rows may share the referenced row
    ManyToOne,
    /// One owner row has many join rows
    OneToMany,
}

/// Why a table exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableKind {
    /// Base table of a composite type
    Entity,
    /// Intermediate table synthesized for a relationship field
    Join,
}
