//! Persistent ledger of executed migrations.
//!
//! The ledger lives in the target database itself, in the `mallard` schema,
//! and is the source of truth for "already applied". All functions take a
//! borrowed [`Connection`] so inserts and deletes compose with the runner's
//! per-script transaction.

use crate::error::{EngineError, EngineResult};
use duckdb::Connection;
use mallard_core::{Direction, MigrationName};
use serde::Serialize;
use std::collections::HashSet;

/// Batch recorded by a bare `down` run. Never produced by `next_batch`, so
/// it cannot collide with a revertible up batch.
pub const DOWN_SENTINEL_BATCH: i64 = 0;

const ENSURE_SQL: &str = "\
CREATE SCHEMA IF NOT EXISTS mallard;
CREATE SEQUENCE IF NOT EXISTS mallard.migrations_id_seq;
CREATE TABLE IF NOT EXISTS mallard.migrations (
    id          BIGINT PRIMARY KEY DEFAULT nextval('mallard.migrations_id_seq'),
    name        VARCHAR NOT NULL,
    batch       BIGINT NOT NULL,
    direction   VARCHAR NOT NULL CHECK (direction IN ('up', 'down')),
    executed_at TIMESTAMP NOT NULL DEFAULT now()
);";

/// One row of the migration ledger.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    /// Surrogate key, insertion-ordered
    pub id: i64,
    /// Logical migration name
    pub name: MigrationName,
    /// Batch the script ran in
    pub batch: i64,
    /// Direction the script ran in
    pub direction: Direction,
    /// Execution timestamp as recorded by the database
    pub executed_at: String,
}

/// Idempotently create the ledger schema, sequence, and table.
pub fn ensure_schema(conn: &Connection) -> EngineResult<()> {
    conn.execute_batch(ENSURE_SQL)
        .map_err(|e| EngineError::SchemaError(format!("failed to create ledger table: {e}")))
}

/// Names with a recorded entry for `direction`.
pub fn applied_names(
    conn: &Connection,
    direction: Direction,
) -> EngineResult<HashSet<MigrationName>> {
    let mut stmt = conn
        .prepare("SELECT name FROM mallard.migrations WHERE direction = ?")
        .map_err(|e| EngineError::QueryError(format!("prepare applied_names: {e}")))?;
    let names = stmt
        .query_map(duckdb::params![direction.as_str()], |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| EngineError::QueryError(format!("query applied_names: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| EngineError::QueryError(format!("collect applied_names: {e}")))?;
    Ok(names.into_iter().map(MigrationName::new).collect())
}

/// Batch number the next `up` invocation will use: `1 + max(batch)` over up
/// rows, or `1` for a fresh ledger.
///
/// Read-then-insert: callers must serialize invocations across processes.
pub fn next_batch(conn: &Connection) -> EngineResult<i64> {
    let max: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(batch), 0) FROM mallard.migrations WHERE direction = 'up'",
            [],
            |row| row.get(0),
        )
        .map_err(|e| EngineError::QueryError(format!("query next_batch: {e}")))?;
    Ok(max + 1)
}

/// Most recent up batch, or `None` for an empty ledger.
pub fn last_batch(conn: &Connection) -> EngineResult<Option<i64>> {
    conn.query_row(
        "SELECT MAX(batch) FROM mallard.migrations WHERE direction = 'up'",
        [],
        |row| row.get::<_, Option<i64>>(0),
    )
    .map_err(|e| EngineError::QueryError(format!("query last_batch: {e}")))
}

/// Names applied up in `batch`, most recently applied first.
///
/// The reverse insertion order is what makes batch rollback dependency-safe.
pub fn members_of_batch(conn: &Connection, batch: i64) -> EngineResult<Vec<MigrationName>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM mallard.migrations \
             WHERE batch = ? AND direction = 'up' ORDER BY id DESC",
        )
        .map_err(|e| EngineError::QueryError(format!("prepare members_of_batch: {e}")))?;
    let names = stmt
        .query_map(duckdb::params![batch], |row| row.get::<_, String>(0))
        .map_err(|e| EngineError::QueryError(format!("query members_of_batch: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| EngineError::QueryError(format!("collect members_of_batch: {e}")))?;
    Ok(names.into_iter().map(MigrationName::new).collect())
}

/// Record one executed script. Must run inside the same transaction as the
/// script body.
pub fn record(
    conn: &Connection,
    name: &MigrationName,
    direction: Direction,
    batch: i64,
) -> EngineResult<()> {
    conn.execute(
        "INSERT INTO mallard.migrations (name, batch, direction) VALUES (?, ?, ?)",
        duckdb::params![name.as_str(), batch, direction.as_str()],
    )
    .map_err(|e| EngineError::LedgerWriteFailure {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// Delete both the up and down rows for `name`, fully re-opening it for
/// reapplication.
pub fn delete_entries(conn: &Connection, name: &MigrationName) -> EngineResult<()> {
    conn.execute(
        "DELETE FROM mallard.migrations WHERE name = ?",
        duckdb::params![name.as_str()],
    )
    .map_err(|e| EngineError::LedgerWriteFailure {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// Every ledger row in insertion order, for status reporting.
pub fn entries(conn: &Connection) -> EngineResult<Vec<LedgerEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, batch, direction, CAST(executed_at AS VARCHAR) \
             FROM mallard.migrations ORDER BY id",
        )
        .map_err(|e| EngineError::QueryError(format!("prepare entries: {e}")))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| EngineError::QueryError(format!("query entries: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| EngineError::QueryError(format!("collect entries: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|(id, name, batch, direction, executed_at)| LedgerEntry {
            id,
            name: MigrationName::new(name),
            batch,
            // CHECK constraint guarantees 'up' or 'down'
            direction: if direction == "down" {
                Direction::Down
            } else {
                Direction::Up
            },
            executed_at,
        })
        .collect())
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
