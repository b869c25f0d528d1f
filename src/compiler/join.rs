//! Join table derivation

use crate::models::{
    Cardinality, ColumnDefinition, ColumnType, CompositeDescription, DeleteRule, ForeignKey,
    RowIdentity, TableDefinition, UniqueConstraint,
};

pub const PARENT_COLUMN: &str = "parent";
pub const KEY_COLUMN: &str = "key";
pub const ORDER_COLUMN: &str = "order";
pub const VALUE_COLUMN: &str = "value";

/// A composite element stored by a join table, with its row identity
pub(crate) struct ReferencedElement<'a> {
    pub composite: &'a CompositeDescription,
    pub identity: RowIdentity,
}

/// What a join table's `value` column holds
pub(crate) enum JoinValue<'a> {
    Column(ColumnType),
    Reference(ReferencedElement<'a>),
}

/// Extra column distinguishing rows of one parent
pub(crate) enum JoinDiscriminator {
    Key(ColumnType),
    Order,
    /// Sets: `(parent, value)` is unique
    None,
}

/// Intermediate table for a collection field of `owner`
pub(crate) fn collection_table(
    owner: &CompositeDescription,
    owner_identity: &RowIdentity,
    field: &str,
    row_id_column: &str,
    discriminator: JoinDiscriminator,
    value: JoinValue<'_>,
) -> TableDefinition {
    let mut table = TableDefinition::join(&owner.name, field, row_id_column);
    add_parent(&mut table, owner, owner_identity, Cardinality::OneToMany);

    match discriminator {
        JoinDiscriminator::Key(column_type) => {
            table.add_column(ColumnDefinition::new(KEY_COLUMN, column_type));
            table.add_unique(UniqueConstraint::new([PARENT_COLUMN, KEY_COLUMN]));
        }
        JoinDiscriminator::Order => {
            table.add_column(ColumnDefinition::new(ORDER_COLUMN, ColumnType::Integer));
            table.add_unique(UniqueConstraint::new([PARENT_COLUMN, ORDER_COLUMN]));
        }
        JoinDiscriminator::None => {
            table.add_unique(UniqueConstraint::new([PARENT_COLUMN, VALUE_COLUMN]));
        }
    }

    match value {
        JoinValue::Column(column_type) => {
            table.add_column(ColumnDefinition::new(VALUE_COLUMN, column_type));
        }
        JoinValue::Reference(element) => {
            // entities outlive the collections that mention them
            let (on_delete, cardinality) = if element.composite.identifiable {
                (DeleteRule::Deny, Cardinality::ManyToOne)
            } else {
                (DeleteRule::Cascade, Cardinality::OneToOne)
            };
            add_value_reference(&mut table, &element, on_delete, cardinality);
        }
    }

    table
}

/// Intermediate table holding exactly one owned composite per owner row
pub(crate) fn owned_reference_table(
    owner: &CompositeDescription,
    owner_identity: &RowIdentity,
    field: &str,
    row_id_column: &str,
    element: ReferencedElement<'_>,
) -> TableDefinition {
    let mut table = TableDefinition::join(&owner.name, field, row_id_column);
    add_parent(&mut table, owner, owner_identity, Cardinality::OneToOne);
    add_value_reference(&mut table, &element, DeleteRule::Cascade, Cardinality::OneToOne);
    table.add_unique(UniqueConstraint::new([PARENT_COLUMN]));
    table
}

fn add_parent(
    table: &mut TableDefinition,
    owner: &CompositeDescription,
    owner_identity: &RowIdentity,
    cardinality: Cardinality,
) {
    table.add_foreign_key(
        ColumnDefinition::new(PARENT_COLUMN, owner_identity.column_type()),
        ForeignKey::new(
            PARENT_COLUMN,
            &owner.name,
            owner_identity.column(),
            DeleteRule::Cascade,
            cardinality,
        ),
    );
}

fn add_value_reference(
    table: &mut TableDefinition,
    element: &ReferencedElement<'_>,
    on_delete: DeleteRule,
    cardinality: Cardinality,
) {
    table.add_foreign_key(
        ColumnDefinition::new(VALUE_COLUMN, element.identity.column_type()),
        ForeignKey::new(
            VALUE_COLUMN,
            &element.composite.name,
            element.identity.column(),
            on_delete,
            cardinality,
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declared::TypeKey;

    fn owner() -> CompositeDescription {
        CompositeDescription {
            key: TypeKey::of::<u8>(),
            name: "Author".to_string(),
            fields: Vec::new(),
            identifiable: false,
        }
    }

    fn synthetic() -> RowIdentity {
        RowIdentity::Synthetic {
            column: "rowid".to_string(),
        }
    }

    #[test]
    fn test_map_table_layout() {
        let table = collection_table(
            &owner(),
            &synthetic(),
            "ratings",
            "rowid",
            JoinDiscriminator::Key(ColumnType::Text),
            JoinValue::Column(ColumnType::Double),
        );
        assert_eq!(table.name, "Author_ratings");
        assert_eq!(table.column_names(), vec!["parent", "key", "value"]);
        assert_eq!(
            table.unique_constraints,
            vec![UniqueConstraint::new(["parent", "key"])]
        );
        let parent = table.foreign_key("parent").unwrap();
        assert_eq!(parent.references_column, "rowid");
        assert_eq!(parent.on_delete, DeleteRule::Cascade);
        assert_eq!(parent.cardinality, Cardinality::OneToMany);
        assert_eq!(table.column("parent").unwrap().column_type, ColumnType::BigInt);
    }

    #[test]
    fn test_set_table_is_unique_on_value() {
        let table = collection_table(
            &owner(),
            &synthetic(),
            "tags",
            "rowid",
            JoinDiscriminator::None,
            JoinValue::Column(ColumnType::Text),
        );
        assert_eq!(table.column_names(), vec!["parent", "value"]);
        assert_eq!(
            table.unique_constraints,
            vec![UniqueConstraint::new(["parent", "value"])]
        );
    }

    #[test]
    fn test_owned_reference_table() {
        let target = CompositeDescription {
            key: TypeKey::of::<u16>(),
            name: "Address".to_string(),
            fields: Vec::new(),
            identifiable: false,
        };
        let table = owned_reference_table(
            &owner(),
            &synthetic(),
            "home",
            "rowid",
            ReferencedElement {
                composite: &target,
                identity: synthetic(),
            },
        );
        assert_eq!(table.name, "Author_home");
        assert_eq!(table.unique_constraints, vec![UniqueConstraint::new(["parent"])]);
        let value = table.foreign_key("value").unwrap();
        assert_eq!(value.references_table, "Address");
        assert_eq!(value.on_delete, DeleteRule::Cascade);
    }
}
