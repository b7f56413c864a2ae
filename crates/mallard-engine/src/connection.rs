//! Target database connection wrapper.
//!
//! [`MigrationDb`] owns a DuckDB [`Connection`] to the database being
//! migrated and provides the transaction helper the runner builds on.
//! Opening a database bootstraps the ledger schema, so every entry point
//! sees a usable ledger.

use crate::error::{EngineError, EngineResult};
use crate::ledger;
use duckdb::Connection;
use std::path::Path;

/// Wrapper around a DuckDB connection to the target database.
///
/// Single-threaded — no `Mutex` needed because migration runs are strictly
/// sequential.
pub struct MigrationDb {
    conn: Connection,
}

impl MigrationDb {
    /// Open (or create) the database at `path` and ensure the ledger exists.
    pub fn open(path: &Path) -> EngineResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| EngineError::ConnectionError(format!("{e}: {}", path.display())))?;
        ledger::ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open from a path string, honoring the `:memory:` special case.
    pub fn open_str(path: &str) -> EngineResult<Self> {
        if path == ":memory:" {
            Self::open_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Create an in-memory database with the ledger schema in place.
    ///
    /// Useful for tests that need a disposable target.
    pub fn open_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| EngineError::ConnectionError(e.to_string()))?;
        ledger::ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back
    /// on error.
    pub fn transaction<F, T>(&self, body: F) -> EngineResult<T>
    where
        F: FnOnce(&Connection) -> EngineResult<T>,
    {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| EngineError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(EngineError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = self.conn.execute_batch("ROLLBACK");
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
