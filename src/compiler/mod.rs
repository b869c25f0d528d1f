//! Relational compilation
//!
//! Translates each composite of a [`Schema`] into a base table plus one join
//! table per collection field. Tables are emitted in schema order, each base
//! table followed by its join tables in field order; they are not sorted by
//! dependency (see [`creation_order`]).

mod config;
mod error;
pub mod join;

pub use config::{CompilerConfig, CompilerConfigBuilder, OwnedReferenceLayout};
pub use error::CompileError;
pub use crate::validation::{RelationshipValidationError, creation_order};

use tracing::{debug, info};

use crate::declared::{RecordRef, TypeKey};
use crate::models::{
    Cardinality, ColumnDefinition, CompositeDescription, DeleteRule, Field, ForeignKey,
    MultiValueDescription, RowIdentity, TableDefinition, TableKind, TypeDescription,
    UniqueConstraint,
};
use crate::schema::Schema;
use crate::validation::tables::origin_label;
use crate::validation::{IDENTIFIER_FIELD, TableNameRegistry};

use join::{JoinDiscriminator, JoinValue, ReferencedElement};

/// Schema to table definition compiler
#[derive(Debug, Clone, Default)]
pub struct RelationalCompiler {
    config: CompilerConfig,
}

impl RelationalCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile every composite of `schema`
    pub fn compile(&self, schema: &Schema) -> Result<Vec<TableDefinition>, CompileError> {
        let mut tables = Vec::new();
        let mut names = TableNameRegistry::<(TypeKey, Option<String>)>::new();

        for composite in schema.composites() {
            for table in self.compile_composite(schema, composite)? {
                Self::check_join_row_id(&table)?;
                let label = origin_label(&table);
                let origin = (composite.key, table.source_field.clone());
                names.register(&table.name, origin, &label).map_err(|conflict| {
                    CompileError::DuplicateTableName {
                        name: conflict.name,
                        existing: conflict.existing,
                        incoming: conflict.incoming,
                    }
                })?;
                debug!(
                    "Compiled table {} ({} columns, {} foreign keys)",
                    table.name,
                    table.columns.len(),
                    table.foreign_keys.len()
                );
                tables.push(table);
            }
        }

        info!(
            "Compiled {} composites into {} tables",
            schema.len(),
            tables.len()
        );
        Ok(tables)
    }

    /// A join table's synthetic row id must not shadow its fixed columns
    fn check_join_row_id(table: &TableDefinition) -> Result<(), CompileError> {
        if table.kind != TableKind::Join || !table.row_identity.is_synthetic() {
            return Ok(());
        }
        let row_id = table.row_identity.column();
        match table
            .columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(row_id))
        {
            Some(column) => Err(CompileError::RowIdColumnConflict {
                field: format!("{}.{}", table.name, column.name),
                column: row_id.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Base table of `composite`, then its join tables in field order
    fn compile_composite(
        &self,
        schema: &Schema,
        composite: &CompositeDescription,
    ) -> Result<Vec<TableDefinition>, CompileError> {
        let identity = self.row_identity(composite);
        if identity.is_synthetic() {
            if let Some(field) = composite
                .fields
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(identity.column()))
            {
                return Err(CompileError::RowIdColumnConflict {
                    field: field.path.clone(),
                    column: identity.column().to_string(),
                });
            }
        }

        let mut base = TableDefinition::entity(&composite.name, identity.clone());
        let mut joins = Vec::new();

        for field in &composite.fields {
            match &field.description {
                TypeDescription::Primitive(primitive) => {
                    let column = ColumnDefinition::new(&field.name, primitive.column_type());
                    if field.name == IDENTIFIER_FIELD && composite.identifiable {
                        base.add_column(column.primary_key());
                        base.add_unique(UniqueConstraint::new([IDENTIFIER_FIELD]));
                    } else {
                        base.add_column(column);
                    }
                }
                TypeDescription::Optional(inner) => match inner.as_ref() {
                    TypeDescription::Primitive(primitive) => {
                        base.add_column(
                            ColumnDefinition::new(&field.name, primitive.column_type())
                                .nullable(true),
                        );
                    }
                    TypeDescription::Composite(record) => {
                        self.compile_reference(schema, composite, field, record, true, &mut base)?;
                    }
                    _ => return Err(unsupported(field)),
                },
                TypeDescription::Composite(record) => {
                    let target = resolve(schema, field, record)?;
                    if self.config.owned_reference_layout == OwnedReferenceLayout::JoinTable
                        && !composite.identifiable
                        && !target.identifiable
                    {
                        joins.push(join::owned_reference_table(
                            composite,
                            &identity,
                            &field.name,
                            &self.config.row_id_column,
                            ReferencedElement {
                                composite: target,
                                identity: self.row_identity(target),
                            },
                        ));
                    } else {
                        self.compile_reference(schema, composite, field, record, false, &mut base)?;
                    }
                }
                TypeDescription::MultiValue(multi) => {
                    joins.push(self.compile_collection(schema, composite, &identity, field, multi)?);
                }
            }
        }

        let mut tables = Vec::with_capacity(joins.len() + 1);
        tables.push(base);
        tables.extend(joins);
        Ok(tables)
    }

    /// Foreign-key column on the owner's table for a to-one reference
    fn compile_reference(
        &self,
        schema: &Schema,
        composite: &CompositeDescription,
        field: &Field,
        record: &RecordRef,
        optional: bool,
        base: &mut TableDefinition,
    ) -> Result<(), CompileError> {
        let target = resolve(schema, field, record)?;
        let target_identity = self.row_identity(target);

        let on_delete = if optional {
            DeleteRule::SetNull
        } else if composite.identifiable && target.identifiable {
            DeleteRule::Deny
        } else {
            DeleteRule::Cascade
        };
        let cardinality = if target.identifiable {
            Cardinality::ManyToOne
        } else {
            Cardinality::OneToOne
        };

        base.add_foreign_key(
            ColumnDefinition::new(&field.name, target_identity.column_type()).nullable(optional),
            ForeignKey::new(
                &field.name,
                &target.name,
                target_identity.column(),
                on_delete,
                cardinality,
            )
            .optional(optional),
        );
        Ok(())
    }

    fn compile_collection(
        &self,
        schema: &Schema,
        composite: &CompositeDescription,
        identity: &RowIdentity,
        field: &Field,
        multi: &MultiValueDescription,
    ) -> Result<TableDefinition, CompileError> {
        let discriminator = match &multi.key {
            Some(key) => {
                let primitive = key.as_primitive().ok_or_else(|| unsupported(field))?;
                JoinDiscriminator::Key(primitive.column_type())
            }
            None if multi.ordered => JoinDiscriminator::Order,
            None => JoinDiscriminator::None,
        };

        let value = match multi.value.as_ref() {
            TypeDescription::Primitive(primitive) => JoinValue::Column(primitive.column_type()),
            TypeDescription::Composite(record) => {
                let element = resolve(schema, field, record)?;
                JoinValue::Reference(ReferencedElement {
                    composite: element,
                    identity: self.row_identity(element),
                })
            }
            _ => return Err(unsupported(field)),
        };

        Ok(join::collection_table(
            composite,
            identity,
            &field.name,
            &self.config.row_id_column,
            discriminator,
            value,
        ))
    }

    /// `id` when the composite has one, else the synthetic row id
    fn row_identity(&self, composite: &CompositeDescription) -> RowIdentity {
        match composite.identifier() {
            Some(primitive) => RowIdentity::Identifier {
                column: IDENTIFIER_FIELD.to_string(),
                column_type: primitive.column_type(),
            },
            None => RowIdentity::Synthetic {
                column: self.config.row_id_column.clone(),
            },
        }
    }
}

fn resolve<'s>(
    schema: &'s Schema,
    field: &Field,
    record: &RecordRef,
) -> Result<&'s CompositeDescription, CompileError> {
    schema
        .resolve(record)
        .ok_or_else(|| CompileError::UnresolvedComposite {
            field: field.path.clone(),
            type_name: record.name().to_string(),
        })
}

fn unsupported(field: &Field) -> CompileError {
    CompileError::UnsupportedFieldShape {
        field: field.path.clone(),
        type_name: field.type_name.clone(),
    }
}
