//! Schema construction
//!
//! A [`Schema`] is the ordered, deduplicated set of composite descriptions
//! reachable from a list of root records. Order is breadth-first discovery
//! order from the roots.

mod cache;
mod config;
mod error;

pub use cache::DescriptionCache;
pub use config::{SchemaConfig, SchemaConfigBuilder};
pub use error::{FieldContext, SchemaError};

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::declared::{RecordRef, StoredRecord, TypeKey};
use crate::models::{CompositeDescription, PrimitiveType};
use crate::validation::TableNameRegistry;

/// Validated composite descriptions reachable from the roots
#[derive(Debug, Clone)]
pub struct Schema {
    composites: Vec<Arc<CompositeDescription>>,
    index: HashMap<TypeKey, usize>,
    roots: Vec<TypeKey>,
}

impl Schema {
    /// Build a schema from `roots` with the default configuration
    pub fn build(roots: &[RecordRef]) -> Result<Self, SchemaError> {
        roots
            .iter()
            .fold(SchemaBuilder::new(), |builder, root| builder.root_ref(*root))
            .build()
    }

    /// Build a schema rooted at `T`
    pub fn of<T: StoredRecord>() -> Result<Self, SchemaError> {
        SchemaBuilder::new().root::<T>().build()
    }

    /// Composites in discovery order
    pub fn composites(&self) -> &[Arc<CompositeDescription>] {
        &self.composites
    }

    pub fn len(&self) -> usize {
        self.composites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composites.is_empty()
    }

    pub fn get(&self, key: TypeKey) -> Option<&CompositeDescription> {
        self.index.get(&key).map(|&i| self.composites[i].as_ref())
    }

    /// Resolve a composite reference found in a field description
    pub fn resolve(&self, record: &RecordRef) -> Option<&CompositeDescription> {
        self.get(record.key())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&CompositeDescription> {
        self.composites
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.as_ref())
    }

    pub fn contains<T: StoredRecord>(&self) -> bool {
        self.index.contains_key(&TypeKey::of::<T>())
    }

    /// Every primitive type stored by any field, sorted
    pub fn primitive_types(&self) -> Vec<PrimitiveType> {
        let mut found = BTreeSet::new();
        for composite in &self.composites {
            composite.primitive_types(&mut found);
        }
        found.into_iter().collect()
    }

    /// The root composites, in the order they were supplied
    pub fn roots(&self) -> impl Iterator<Item = &CompositeDescription> + '_ {
        self.roots.iter().filter_map(|key| self.get(*key))
    }
}

/// Worklist builder for [`Schema`].
///
/// # Example
///
/// ```rust
/// use stored_schema::declared::{FieldSet, StoredRecord};
/// use stored_schema::schema::SchemaBuilder;
///
/// struct Tag;
///
/// impl StoredRecord for Tag {
///     fn describe_fields(fields: &mut FieldSet) {
///         fields.field::<String>("label");
///     }
/// }
///
/// let schema = SchemaBuilder::new().root::<Tag>().build().unwrap();
/// assert!(schema.contains::<Tag>());
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    config: SchemaConfig,
    cache: Arc<DescriptionCache>,
    roots: Vec<RecordRef>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a cache shared with other builders
    pub fn with_cache(mut self, cache: Arc<DescriptionCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn root<T: StoredRecord>(self) -> Self {
        self.root_ref(RecordRef::of::<T>())
    }

    pub fn root_ref(mut self, record: RecordRef) -> Self {
        self.roots.push(record);
        self
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<DescriptionCache> {
        &self.cache
    }

    /// Describe every record reachable from the roots.
    ///
    /// Fails with the first violation found, in discovery order.
    pub fn build(&self) -> Result<Schema, SchemaError> {
        let mut worklist: VecDeque<RecordRef> = self.roots.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut names = TableNameRegistry::new();
        let mut composites = Vec::new();
        let mut index = HashMap::new();

        while let Some(record) = worklist.pop_front() {
            if !seen.insert(record.key()) {
                trace!("Skipping already described composite {}", record.name());
                continue;
            }

            let description = self.cache.get_or_describe(&record, &self.config)?;

            if let Err(conflict) = names.register(&description.name, record.key(), record.path())
            {
                if self.config.reject_name_collisions {
                    return Err(SchemaError::TableNameCollision {
                        name: conflict.name,
                        existing: conflict.existing,
                        incoming: conflict.incoming,
                    });
                }
                warn!(
                    "Table name {} is derived by both {} and {}",
                    conflict.name, conflict.existing, conflict.incoming
                );
            }

            for referenced in description.referenced_records() {
                if !seen.contains(&referenced.key()) {
                    worklist.push_back(referenced);
                }
            }

            debug!(
                "Described composite {} with {} fields",
                description.name,
                description.fields.len()
            );
            index.insert(record.key(), composites.len());
            composites.push(description);
        }

        let mut root_keys = HashSet::with_capacity(self.roots.len());
        let roots: Vec<TypeKey> = self
            .roots
            .iter()
            .map(RecordRef::key)
            .filter(|key| root_keys.insert(*key))
            .collect();

        info!(
            "Built schema with {} composites from {} roots",
            composites.len(),
            roots.len()
        );

        Ok(Schema {
            composites,
            index,
            roots,
        })
    }
}
