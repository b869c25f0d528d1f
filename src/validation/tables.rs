//! Table validation functionality
//!
//! Detects naming conflicts: two distinct origins deriving the same table
//! name. Names are compared ASCII case-insensitively, since several engines
//! fold identifier case.

use std::collections::HashMap;

use crate::models::TableDefinition;

/// Naming conflict between two table origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConflict {
    pub name: String,
    pub existing: String,
    pub incoming: String,
}

/// Tracks which origin claimed each table name.
///
/// `K` identifies an origin; registering the same name twice for the same
/// origin is not a conflict.
#[derive(Debug)]
pub struct TableNameRegistry<K> {
    names: HashMap<String, (K, String)>,
}

impl<K> Default for TableNameRegistry<K> {
    fn default() -> Self {
        Self {
            names: HashMap::new(),
        }
    }
}

impl<K: PartialEq> TableNameRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name` for `origin`; `label` describes the origin in diagnostics
    pub fn register(&mut self, name: &str, origin: K, label: &str) -> Result<(), NamingConflict> {
        let folded = name.to_ascii_lowercase();
        match self.names.get(&folded) {
            Some((existing, _)) if *existing == origin => Ok(()),
            Some((_, existing_label)) => Err(NamingConflict {
                name: name.to_string(),
                existing: existing_label.clone(),
                incoming: label.to_string(),
            }),
            None => {
                self.names.insert(folded, (origin, label.to_string()));
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Table validator
#[derive(Debug, Default)]
pub struct TableValidator;

impl TableValidator {
    /// Create a new table validator
    pub fn new() -> Self {
        Self
    }

    /// Detect tables whose names collide with an earlier table
    pub fn detect_naming_conflicts(&self, tables: &[TableDefinition]) -> Vec<NamingConflict> {
        let mut registry = TableNameRegistry::new();
        let mut conflicts = Vec::new();
        for (index, table) in tables.iter().enumerate() {
            if let Err(conflict) = registry.register(&table.name, index, &origin_label(table)) {
                conflicts.push(conflict);
            }
        }
        conflicts
    }
}

/// `Owner` for base tables, `Owner.field` for join tables
pub fn origin_label(table: &TableDefinition) -> String {
    match &table.source_field {
        Some(field) => format!("{}.{}", table.source_type, field),
        None => table.source_type.clone(),
    }
}
