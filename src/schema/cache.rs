//! Memoized composite descriptions

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::classify::describe_record;
use crate::declared::{RecordRef, TypeKey};
use crate::models::CompositeDescription;

use super::{SchemaConfig, SchemaError};

/// Cache entry key: type identity plus the reserved names it was validated
/// against, folded to lowercase, sorted and deduplicated.
type EntryKey = (TypeKey, Vec<String>);

/// Thread-safe memo of composite descriptions keyed by type identity.
///
/// Only successful descriptions are stored; a failing record is described
/// again on the next request. Entries are scoped to the reserved field names
/// of the [`SchemaConfig`] they were described under, so builders with
/// different configurations can share one cache (through `Arc`).
#[derive(Debug, Default)]
pub struct DescriptionCache {
    entries: Mutex<HashMap<EntryKey, Arc<CompositeDescription>>>,
}

impl DescriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached description of `key` as described under `config`
    pub fn get(&self, key: TypeKey, config: &SchemaConfig) -> Option<Arc<CompositeDescription>> {
        self.entries().get(&entry_key(key, config)).cloned()
    }

    /// Return the cached description of `record`, describing it on a miss
    pub fn get_or_describe(
        &self,
        record: &RecordRef,
        config: &SchemaConfig,
    ) -> Result<Arc<CompositeDescription>, SchemaError> {
        let key = entry_key(record.key(), config);
        if let Some(cached) = self.entries().get(&key).cloned() {
            return Ok(cached);
        }

        // describe without holding the lock; a racing insert wins
        let described = Arc::new(describe_record(record, config)?);
        let mut entries = self.entries();
        Ok(Arc::clone(entries.entry(key).or_insert(described)))
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<EntryKey, Arc<CompositeDescription>>> {
        // entries are only ever inserted whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn entry_key(key: TypeKey, config: &SchemaConfig) -> EntryKey {
    let mut reserved: Vec<String> = config
        .reserved_field_names
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();
    reserved.sort();
    reserved.dedup();
    (key, reserved)
}
