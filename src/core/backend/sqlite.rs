//! SQLite-backed storage
//!
//! Every kind shares one `records` table. Natural keys are enforced by a
//! unique index on `(kind, natural_key)`; batches are written inside a
//! single transaction so nested creates are all-or-nothing.

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use super::Backend;
use crate::core::entity::Record;
use crate::core::error::{TraceError, TraceResult};
use crate::core::identity::{EntityId, EntityKind};

/// Current schema version - tables are rebuilt on mismatch
pub(super) const SCHEMA_VERSION: i32 = 1;

pub struct SqliteBackend {
    pub(super) conn: Connection,
}

impl SqliteBackend {
    /// Open or create a database file
    pub fn open(path: &Path) -> TraceResult<Self> {
        let conn = Connection::open(path)?;
        // Enable WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> TraceResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Open `target`, treating `:memory:` as an in-memory database
    pub fn open_target(target: &str) -> TraceResult<Self> {
        if target == ":memory:" {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(target))
        }
    }

    fn from_connection(conn: Connection) -> TraceResult<Self> {
        let mut backend = Self { conn };
        if backend.needs_schema_rebuild() {
            backend.reinitialize_schema()?;
        }
        Ok(backend)
    }
}

fn decode(payload: &str) -> TraceResult<Record> {
    Ok(serde_json::from_str(payload)?)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl Backend for SqliteBackend {
    fn insert(&mut self, records: &[Record]) -> TraceResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO records (id, kind, natural_key, payload, created)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                let key = record.natural_key();
                let payload = serde_json::to_string(record)?;
                let result = stmt.execute(params![
                    record.id().to_string(),
                    record.kind().prefix(),
                    key.as_ref().map(|(_, v)| v.as_str()),
                    payload,
                    record.created().to_rfc3339(),
                ]);
                match result {
                    Ok(_) => {}
                    Err(e) if is_unique_violation(&e) => {
                        // Dropping the transaction rolls the batch back
                        let (field, value) = key.unwrap_or(("id", record.id().to_string()));
                        return Err(TraceError::DuplicateKey {
                            kind: record.kind(),
                            field,
                            value,
                        });
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get(&self, kind: EntityKind, id: &EntityId) -> TraceResult<Option<Record>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM records WHERE kind = ?1 AND id = ?2",
                params![kind.prefix(), id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        payload.as_deref().map(decode).transpose()
    }

    fn find_by_key(&self, kind: EntityKind, key: &str) -> TraceResult<Option<EntityId>> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM records WHERE kind = ?1 AND natural_key = ?2",
                params![kind.prefix(), key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(|s| EntityId::parse(&s)).transpose()?)
    }

    fn list(&self, kind: EntityKind) -> TraceResult<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM records WHERE kind = ?1 ORDER BY seq")?;
        let payloads = stmt
            .query_map(params![kind.prefix()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        payloads.iter().map(|p| decode(p)).collect()
    }

    fn count(&self, kind: EntityKind) -> TraceResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM records WHERE kind = ?1",
            params![kind.prefix()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn delete_all(&mut self, kind: EntityKind) -> TraceResult<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM records WHERE kind = ?1", params![kind.prefix()])?)
    }
}
