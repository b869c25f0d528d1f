//! Record (composite) declarations

use std::fmt;

use super::{DeclaredType, StoredType, TypeKey};

/// A composite record type that can be stored.
///
/// This is the explicit "describe fields of T" capability: implementors list
/// their stored fields in declaration order.
///
/// # Example
///
/// ```rust
/// use stored_schema::declared::{FieldSet, StoredRecord};
/// use uuid::Uuid;
///
/// struct Author {
///     id: Uuid,
///     name: String,
/// }
///
/// impl StoredRecord for Author {
///     fn is_identifiable() -> bool {
///         true
///     }
///
///     fn describe_fields(fields: &mut FieldSet) {
///         fields.field::<Uuid>("id").field::<String>("name");
///     }
/// }
/// ```
pub trait StoredRecord: 'static {
    /// Name of the record; it becomes the base table name
    fn type_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Whether the record exposes a stable `id` identity field
    fn is_identifiable() -> bool {
        false
    }

    /// Whether the record has value semantics (shared-reference types do not)
    fn is_value_type() -> bool {
        true
    }

    fn describe_fields(fields: &mut FieldSet);
}

impl<T: StoredRecord> StoredType for T {
    fn declared_type() -> DeclaredType {
        DeclaredType::record::<T>()
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Everything a record declares about itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    pub name: &'static str,
    pub identifiable: bool,
    pub value_type: bool,
    pub fields: Vec<FieldDeclaration>,
}

/// A lazily described record.
///
/// Holding a `RecordRef` does not describe the record's fields; that only
/// happens when [`RecordRef::shape`] is called. Cyclic record graphs are
/// therefore finite values.
#[derive(Clone, Copy)]
pub struct RecordRef {
    key: TypeKey,
    name: &'static str,
    path: &'static str,
    shape: fn() -> RecordShape,
}

impl RecordRef {
    pub fn of<T: StoredRecord>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            name: T::type_name(),
            path: std::any::type_name::<T>(),
            shape: shape_of::<T>,
        }
    }

    /// Construct a reference from its parts, for hosts that register records
    /// without implementing [`StoredRecord`].
    pub fn from_parts(key: TypeKey, name: &'static str, shape: fn() -> RecordShape) -> Self {
        Self {
            key,
            name,
            path: name,
            shape,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fully qualified host type path, for diagnostics
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Describe the record's fields
    pub fn shape(&self) -> RecordShape {
        (self.shape)()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RecordRef {}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordRef").field(&self.name).finish()
    }
}

fn shape_of<T: StoredRecord>() -> RecordShape {
    let mut fields = FieldSet::new();
    T::describe_fields(&mut fields);
    RecordShape {
        name: T::type_name(),
        identifiable: T::is_identifiable(),
        value_type: T::is_value_type(),
        fields: fields.into_declarations(),
    }
}

/// One declared field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub name: String,
    pub declared: DeclaredType,
    /// Host name of the field's type, used in diagnostics
    pub type_name: String,
}

/// Declarative builder for a record's fields.
#[derive(Debug, Default)]
pub struct FieldSet {
    fields: Vec<FieldDeclaration>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field holding `T`
    pub fn field<T: StoredType>(&mut self, name: &str) -> &mut Self {
        self.fields.push(FieldDeclaration {
            name: name.to_string(),
            declared: T::declared_type(),
            type_name: std::any::type_name::<T>().to_string(),
        });
        self
    }

    /// Declare a field from an explicit declared type
    pub fn declare(&mut self, name: &str, declared: DeclaredType) -> &mut Self {
        let type_name = declared.to_string();
        self.fields.push(FieldDeclaration {
            name: name.to_string(),
            declared,
            type_name,
        });
        self
    }

    /// Declare a field whose type has no storage mapping
    pub fn opaque<T: ?Sized>(&mut self, name: &str) -> &mut Self {
        self.fields.push(FieldDeclaration {
            name: name.to_string(),
            declared: DeclaredType::opaque::<T>(),
            type_name: std::any::type_name::<T>().to_string(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_declarations(self) -> Vec<FieldDeclaration> {
        self.fields
    }
}
