//! In-memory backend

use std::collections::HashMap;

use indexmap::IndexMap;

use super::Backend;
use crate::core::entity::Record;
use crate::core::error::{TraceError, TraceResult};
use crate::core::identity::{EntityId, EntityKind};

/// Insertion-ordered tables per kind, plus a natural-key index
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: HashMap<EntityKind, IndexMap<EntityId, Record>>,
    keys: HashMap<EntityKind, HashMap<String, EntityId>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn insert(&mut self, records: &[Record]) -> TraceResult<()> {
        // Check the whole batch before touching any table
        let mut batch_keys: HashMap<EntityKind, Vec<String>> = HashMap::new();
        for record in records {
            if let Some((field, value)) = record.natural_key() {
                let kind = record.kind();
                let taken = self
                    .keys
                    .get(&kind)
                    .is_some_and(|keys| keys.contains_key(&value));
                let staged = batch_keys.entry(kind).or_default();
                if taken || staged.contains(&value) {
                    return Err(TraceError::DuplicateKey { kind, field, value });
                }
                staged.push(value);
            }
        }

        for record in records {
            let kind = record.kind();
            if let Some((_, value)) = record.natural_key() {
                self.keys
                    .entry(kind)
                    .or_default()
                    .insert(value, record.id().clone());
            }
            self.tables
                .entry(kind)
                .or_default()
                .insert(record.id().clone(), record.clone());
        }
        Ok(())
    }

    fn get(&self, kind: EntityKind, id: &EntityId) -> TraceResult<Option<Record>> {
        Ok(self.tables.get(&kind).and_then(|t| t.get(id)).cloned())
    }

    fn find_by_key(&self, kind: EntityKind, key: &str) -> TraceResult<Option<EntityId>> {
        Ok(self.keys.get(&kind).and_then(|k| k.get(key)).cloned())
    }

    fn list(&self, kind: EntityKind) -> TraceResult<Vec<Record>> {
        Ok(self
            .tables
            .get(&kind)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default())
    }

    fn count(&self, kind: EntityKind) -> TraceResult<usize> {
        Ok(self.tables.get(&kind).map_or(0, IndexMap::len))
    }

    fn delete_all(&mut self, kind: EntityKind) -> TraceResult<usize> {
        self.keys.remove(&kind);
        Ok(self.tables.remove(&kind).map_or(0, |t| t.len()))
    }
}
