//! Relational compiler tests

use std::collections::{BTreeMap, BTreeSet};

use stored_schema::compiler::{
    CompileError, CompilerConfig, OwnedReferenceLayout, RelationalCompiler,
    RelationshipValidationError, creation_order,
};
use stored_schema::declared::{FieldSet, RecordRef, StoredRecord};
use stored_schema::models::{
    Cardinality, ColumnType, DeleteRule, TableDefinition, TableKind, UniqueConstraint,
};
use stored_schema::schema::{Schema, SchemaBuilder, SchemaConfig};
use uuid::Uuid;

fn compile(schema: &Schema) -> Vec<TableDefinition> {
    RelationalCompiler::default().compile(schema).unwrap()
}

fn table<'a>(tables: &'a [TableDefinition], name: &str) -> &'a TableDefinition {
    tables
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("missing table {name}"))
}

struct Author;

impl StoredRecord for Author {
    fn is_identifiable() -> bool {
        true
    }

    fn describe_fields(fields: &mut FieldSet) {
        fields.field::<Uuid>("id").field::<String>("name");
    }
}

struct Article;

impl StoredRecord for Article {
    fn is_identifiable() -> bool {
        true
    }

    fn describe_fields(fields: &mut FieldSet) {
        fields
            .field::<Uuid>("id")
            .field::<Author>("author")
            .field::<Option<Author>>("editor");
    }
}

struct Metadata;

impl StoredRecord for Metadata {
    fn describe_fields(fields: &mut FieldSet) {
        fields.field::<String>("source");
    }
}

struct Note;

impl StoredRecord for Note {
    fn describe_fields(fields: &mut FieldSet) {
        fields
            .field::<String>("text")
            .field::<Author>("author")
            .field::<Metadata>("metadata");
    }
}

mod base_table_tests {
    use super::*;

    struct Reading;

    impl StoredRecord for Reading {
        fn describe_fields(fields: &mut FieldSet) {
            fields
                .field::<f64>("value")
                .field::<Option<i16>>("sensor")
                .field::<bool>("valid")
                .field::<chrono::DateTime<chrono::Utc>>("taken_at");
        }
    }

    #[test]
    fn test_primitive_composite_is_one_table_with_one_column_per_field() {
        let tables = compile(&Schema::of::<Reading>().unwrap());
        assert_eq!(tables.len(), 1);

        let reading = &tables[0];
        assert_eq!(reading.kind, TableKind::Entity);
        assert_eq!(reading.column_names(), vec!["value", "sensor", "valid", "taken_at"]);
        assert!(reading.row_identity.is_synthetic());
        assert!(reading.foreign_keys.is_empty());

        let sensor = reading.column("sensor").unwrap();
        assert_eq!(sensor.column_type, ColumnType::SmallInt);
        assert!(sensor.nullable);
        assert!(!reading.column("value").unwrap().nullable);
        assert_eq!(
            reading.column("taken_at").unwrap().column_type,
            ColumnType::Timestamp
        );
    }

    #[test]
    fn test_identifier_is_primary_key_and_unique() {
        let tables = compile(&Schema::of::<Author>().unwrap());
        let author = &tables[0];
        let id = author.column("id").unwrap();
        assert!(id.primary_key);
        assert!(!id.nullable);
        assert_eq!(author.unique_constraints, vec![UniqueConstraint::new(["id"])]);
        assert_eq!(author.row_identity.column(), "id");
    }
}

mod relationship_tests {
    use super::*;

    #[test]
    fn test_required_entity_reference_is_denied() {
        let tables = compile(&Schema::of::<Article>().unwrap());
        let article = table(&tables, "Article");

        let author = article.foreign_key("author").unwrap();
        assert_eq!(author.references_table, "Author");
        assert_eq!(author.references_column, "id");
        assert_eq!(author.on_delete, DeleteRule::Deny);
        assert_eq!(author.cardinality, Cardinality::ManyToOne);
        assert!(!article.column("author").unwrap().nullable);
    }

    #[test]
    fn test_optional_reference_sets_null() {
        let tables = compile(&Schema::of::<Article>().unwrap());
        let article = table(&tables, "Article");

        let editor = article.foreign_key("editor").unwrap();
        assert_eq!(editor.on_delete, DeleteRule::SetNull);
        assert!(editor.optional);
        let column = article.column("editor").unwrap();
        assert!(column.nullable);
        assert_eq!(column.column_type, ColumnType::Uuid);
    }

    #[test]
    fn test_owned_references_cascade() {
        let tables = compile(&Schema::of::<Note>().unwrap());
        let note = table(&tables, "Note");

        let author = note.foreign_key("author").unwrap();
        assert_eq!(author.on_delete, DeleteRule::Cascade);
        assert_eq!(author.cardinality, Cardinality::ManyToOne);

        let metadata = note.foreign_key("metadata").unwrap();
        assert_eq!(metadata.on_delete, DeleteRule::Cascade);
        assert_eq!(metadata.cardinality, Cardinality::OneToOne);
        assert_eq!(metadata.references_column, "rowid");
        assert_eq!(note.column("metadata").unwrap().column_type, ColumnType::BigInt);
    }

    #[test]
    fn test_owned_reference_join_table_layout() {
        let config = CompilerConfig::builder()
            .owned_reference_layout(OwnedReferenceLayout::JoinTable)
            .build();
        let tables = RelationalCompiler::new(config)
            .compile(&Schema::of::<Note>().unwrap())
            .unwrap();

        let note = table(&tables, "Note");
        assert_eq!(note.column_names(), vec!["text", "author"]);

        let join = table(&tables, "Note_metadata");
        assert_eq!(join.kind, TableKind::Join);
        assert_eq!(join.column_names(), vec!["parent", "value"]);
        assert_eq!(join.unique_constraints, vec![UniqueConstraint::new(["parent"])]);
        assert_eq!(join.foreign_key("parent").unwrap().on_delete, DeleteRule::Cascade);
        assert_eq!(join.foreign_key("value").unwrap().on_delete, DeleteRule::Cascade);
        assert_eq!(join.foreign_key("value").unwrap().references_table, "Metadata");
    }
}

mod join_table_tests {
    use super::*;

    struct Post;

    impl StoredRecord for Post {
        fn is_identifiable() -> bool {
            true
        }

        fn describe_fields(fields: &mut FieldSet) {
            fields
                .field::<i64>("id")
                .field::<Vec<String>>("lines")
                .field::<BTreeSet<String>>("tags")
                .field::<BTreeMap<String, f64>>("scores")
                .field::<Vec<Author>>("contributors")
                .field::<Vec<Metadata>>("sources");
        }
    }

    struct Draft;

    impl StoredRecord for Draft {
        fn describe_fields(fields: &mut FieldSet) {
            fields.field::<String>("title").field::<Vec<String>>("lines");
        }
    }

    #[test]
    fn test_list_of_primitives() {
        let tables = compile(&Schema::of::<Post>().unwrap());
        let lines = table(&tables, "Post_lines");

        assert_eq!(lines.column_names(), vec!["parent", "order", "value"]);
        assert_eq!(
            lines.unique_constraints,
            vec![UniqueConstraint::new(["parent", "order"])]
        );
        assert_eq!(lines.column("order").unwrap().column_type, ColumnType::Integer);
        assert_eq!(lines.column("value").unwrap().column_type, ColumnType::Text);

        let parent = lines.foreign_key("parent").unwrap();
        assert_eq!(parent.references_table, "Post");
        assert_eq!(parent.references_column, "id");
        assert_eq!(parent.on_delete, DeleteRule::Cascade);
        assert_eq!(parent.cardinality, Cardinality::OneToMany);
        assert_eq!(lines.column("parent").unwrap().column_type, ColumnType::BigInt);
    }

    #[test]
    fn test_set_and_map() {
        let tables = compile(&Schema::of::<Post>().unwrap());

        let tags = table(&tables, "Post_tags");
        assert_eq!(tags.column_names(), vec!["parent", "value"]);
        assert_eq!(
            tags.unique_constraints,
            vec![UniqueConstraint::new(["parent", "value"])]
        );

        let scores = table(&tables, "Post_scores");
        assert_eq!(scores.column_names(), vec!["parent", "key", "value"]);
        assert_eq!(scores.column("key").unwrap().column_type, ColumnType::Text);
        assert_eq!(scores.column("value").unwrap().column_type, ColumnType::Double);
        assert_eq!(
            scores.unique_constraints,
            vec![UniqueConstraint::new(["parent", "key"])]
        );
    }

    #[test]
    fn test_composite_elements() {
        let tables = compile(&Schema::of::<Post>().unwrap());

        let contributors = table(&tables, "Post_contributors");
        let value = contributors.foreign_key("value").unwrap();
        assert_eq!(value.references_table, "Author");
        assert_eq!(value.references_column, "id");
        assert_eq!(value.on_delete, DeleteRule::Deny);
        assert_eq!(
            contributors.column("value").unwrap().column_type,
            ColumnType::Uuid
        );

        let sources = table(&tables, "Post_sources");
        let value = sources.foreign_key("value").unwrap();
        assert_eq!(value.references_column, "rowid");
        assert_eq!(value.on_delete, DeleteRule::Cascade);
    }

    #[test]
    fn test_multi_value_fields_are_not_base_columns() {
        let tables = compile(&Schema::of::<Post>().unwrap());
        assert_eq!(table(&tables, "Post").column_names(), vec!["id"]);
    }

    #[test]
    fn test_table_order() {
        let tables = compile(&Schema::of::<Post>().unwrap());
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Post",
                "Post_lines",
                "Post_tags",
                "Post_scores",
                "Post_contributors",
                "Post_sources",
                "Author",
                "Metadata",
            ]
        );
    }

    #[test]
    fn test_synthetic_parent() {
        let tables = compile(&Schema::of::<Draft>().unwrap());
        let lines = table(&tables, "Draft_lines");
        let parent = lines.foreign_key("parent").unwrap();
        assert_eq!(parent.references_column, "rowid");
        assert_eq!(lines.column("parent").unwrap().column_type, ColumnType::BigInt);
    }
}

mod error_tests {
    use super::*;

    struct Owner;

    impl StoredRecord for Owner {
        fn describe_fields(fields: &mut FieldSet) {
            fields.field::<Vec<String>>("tags");
        }
    }

    struct OwnerTags;

    impl StoredRecord for OwnerTags {
        fn type_name() -> &'static str {
            "Owner_tags"
        }

        fn describe_fields(fields: &mut FieldSet) {
            fields.field::<String>("label");
        }
    }

    struct RowIdField;

    impl StoredRecord for RowIdField {
        fn describe_fields(fields: &mut FieldSet) {
            fields.field::<i64>("oid");
        }
    }

    #[test]
    fn test_join_table_name_collision() {
        let schema =
            Schema::build(&[RecordRef::of::<Owner>(), RecordRef::of::<OwnerTags>()]).unwrap();
        let error = RelationalCompiler::default().compile(&schema).unwrap_err();
        assert_eq!(
            error,
            CompileError::DuplicateTableName {
                name: "Owner_tags".to_string(),
                existing: "Owner.tags".to_string(),
                incoming: "Owner_tags".to_string(),
            }
        );
    }

    #[test]
    fn test_row_id_named_like_join_column() {
        let schema = Schema::of::<Owner>().unwrap();
        for (row_id, column) in [("Value", "value"), ("parent", "parent"), ("ORDER", "order")] {
            let compiler =
                RelationalCompiler::new(CompilerConfig::builder().row_id_column(row_id).build());
            assert_eq!(
                compiler.compile(&schema).unwrap_err(),
                CompileError::RowIdColumnConflict {
                    field: format!("Owner_tags.{column}"),
                    column: row_id.to_string(),
                }
            );
        }

        // no join table here, so "value" is a usable row id
        let compiler =
            RelationalCompiler::new(CompilerConfig::builder().row_id_column("value").build());
        let schema = Schema::of::<RowIdField>().unwrap();
        assert!(compiler.compile(&schema).is_ok());
    }

    #[test]
    fn test_field_named_like_configured_row_id() {
        let schema = Schema::of::<RowIdField>().unwrap();
        let compiler = RelationalCompiler::new(CompilerConfig::builder().row_id_column("OID").build());
        assert!(matches!(
            compiler.compile(&schema),
            Err(CompileError::RowIdColumnConflict { .. })
        ));

        // reserving the name rejects the field before compilation
        let config = SchemaConfig::builder().reserve_field_name("oid").build();
        assert!(SchemaBuilder::new()
            .with_config(config)
            .root::<RowIdField>()
            .build()
            .is_err());
    }
}

mod creation_order_tests {
    use super::*;

    struct Ping;

    impl StoredRecord for Ping {
        fn describe_fields(fields: &mut FieldSet) {
            fields.field::<Pong>("pong");
        }
    }

    struct Pong;

    impl StoredRecord for Pong {
        fn describe_fields(fields: &mut FieldSet) {
            fields.field::<Ping>("ping");
        }
    }

    struct Chain;

    impl StoredRecord for Chain {
        fn describe_fields(fields: &mut FieldSet) {
            fields.field::<Option<Chain>>("next").field::<u8>("step");
        }
    }

    #[test]
    fn test_referenced_tables_first() {
        let tables = compile(&Schema::of::<Article>().unwrap());
        let ordered = creation_order(&tables).unwrap();
        let names: Vec<&str> = ordered.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Author", "Article"]);
    }

    #[test]
    fn test_self_reference_is_allowed() {
        let tables = compile(&Schema::of::<Chain>().unwrap());
        let chain = &tables[0];
        assert!(chain.foreign_key("next").unwrap().is_self_reference(&chain.name));
        assert_eq!(creation_order(&tables).unwrap().len(), 1);
    }

    #[test]
    fn test_mutual_required_references_are_cyclic() {
        let tables = compile(&Schema::of::<Ping>().unwrap());
        assert_eq!(tables.len(), 2);
        assert_eq!(
            creation_order(&tables).unwrap_err(),
            RelationshipValidationError::CyclicReferences {
                tables: vec!["Ping".to_string(), "Pong".to_string()]
            }
        );
    }
}
