//! Database schema initialization

use rusqlite::params;

use super::sqlite::{SqliteBackend, SCHEMA_VERSION};
use crate::core::error::TraceResult;

impl SqliteBackend {
    /// Initialize database schema
    pub(super) fn init_schema(&mut self) -> TraceResult<()> {
        self.conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- One row per record; payload is the JSON-encoded record
            CREATE TABLE IF NOT EXISTS records (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                kind TEXT NOT NULL,
                natural_key TEXT,
                payload TEXT NOT NULL,
                created TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_records_kind ON records(kind);
            CREATE UNIQUE INDEX IF NOT EXISTS idx_records_natural_key
                ON records(kind, natural_key);
            "#,
        )?;

        self.conn.execute("DELETE FROM schema_version", [])?;
        self.conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Check if schema version matches current version
    pub(super) fn needs_schema_rebuild(&self) -> bool {
        let current_version: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        current_version != SCHEMA_VERSION
    }

    /// Drop all tables and reinitialize schema
    pub(super) fn reinitialize_schema(&mut self) -> TraceResult<()> {
        self.conn.execute_batch(
            r#"
            DROP TABLE IF EXISTS schema_version;
            DROP TABLE IF EXISTS records;
            "#,
        )?;
        self.init_schema()
    }
}
