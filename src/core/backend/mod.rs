//! Storage backends behind the entity store
//!
//! The store validates everything before calling into a backend; backends
//! only persist, look up and clear records. Both implementations still
//! refuse a duplicate natural key so a buggy caller cannot corrupt them.

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use crate::core::entity::Record;
use crate::core::error::TraceResult;
use crate::core::identity::{EntityId, EntityKind};

/// Capability the entity store needs from persistent storage
pub trait Backend {
    /// Insert a batch of records; either all are stored or none are
    fn insert(&mut self, records: &[Record]) -> TraceResult<()>;

    /// Look up a record by id
    fn get(&self, kind: EntityKind, id: &EntityId) -> TraceResult<Option<Record>>;

    /// Find the record holding a natural key value
    fn find_by_key(&self, kind: EntityKind, key: &str) -> TraceResult<Option<EntityId>>;

    /// All records of a kind in creation order
    fn list(&self, kind: EntityKind) -> TraceResult<Vec<Record>>;

    fn count(&self, kind: EntityKind) -> TraceResult<usize>;

    /// Remove every record of a kind, returning how many were removed
    fn delete_all(&mut self, kind: EntityKind) -> TraceResult<usize>;
}
