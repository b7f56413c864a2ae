//! Migration runner: per-script transactional apply and the run policies.

use crate::connection::MigrationDb;
use crate::error::{EngineError, EngineResult};
use crate::ledger;
use mallard_core::{Direction, MigrationName, MigrationScript, ScriptStore};
use serde::Serialize;

/// Outcome of a `run_all` / `run_one` invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Direction the run executed in
    pub direction: Direction,
    /// Batch number recorded for applied scripts
    pub batch: i64,
    /// Names applied by this invocation, in execution order
    pub applied: Vec<MigrationName>,
    /// Names skipped because the ledger already records them
    pub skipped: Vec<MigrationName>,
}

/// Drives migration scripts against the target database.
///
/// Owns the injected database handle and script store; no process-wide
/// state. Runs are strictly sequential: each script's transaction reaches a
/// terminal state before the next script starts.
pub struct Migrator {
    db: MigrationDb,
    store: ScriptStore,
}

impl Migrator {
    /// Create a migrator over an opened database and script directory.
    pub fn new(db: MigrationDb, store: ScriptStore) -> Self {
        Self { db, store }
    }

    /// Borrow the underlying database handle.
    pub fn db(&self) -> &MigrationDb {
        &self.db
    }

    /// Borrow the script store.
    pub fn store(&self) -> &ScriptStore {
        &self.store
    }

    /// Execute one script as an atomic unit: script body plus ledger write
    /// in a single transaction.
    ///
    /// On any failure the transaction is rolled back and the error names the
    /// script; no partial effect survives.
    pub fn apply(&self, script: &MigrationScript, batch: i64) -> EngineResult<()> {
        if script.is_empty() {
            return Err(EngineError::EmptyScript {
                name: script.name.to_string(),
                path: script.path.display().to_string(),
            });
        }

        self.db.transaction(|conn| {
            conn.execute_batch(&script.sql)
                .map_err(|e| EngineError::ExecutionFailure {
                    name: script.name.to_string(),
                    message: e.to_string(),
                })?;
            ledger::record(conn, &script.name, script.direction, batch)
        })?;

        log::debug!("applied {} ({})", script.name, script.direction);
        Ok(())
    }

    /// Apply every pending script for `direction`.
    ///
    /// Up runs ascend through the versions and share one freshly computed
    /// batch; down runs walk the versions in reverse (later migrations are
    /// undone before earlier ones they may depend on) and record the
    /// sentinel batch. Names the ledger already records for `direction` are
    /// skipped. The first failure aborts the loop; scripts applied earlier
    /// in the invocation keep their ledger rows.
    pub fn run_all(&self, direction: Direction) -> EngineResult<RunSummary> {
        let mut scripts = self.store.list(direction)?;
        if direction == Direction::Down {
            scripts.reverse();
        }

        let already = ledger::applied_names(self.db.conn(), direction)?;
        let batch = match direction {
            Direction::Up => ledger::next_batch(self.db.conn())?,
            Direction::Down => ledger::DOWN_SENTINEL_BATCH,
        };

        let mut summary = RunSummary {
            direction,
            batch,
            applied: Vec::new(),
            skipped: Vec::new(),
        };
        for script in &scripts {
            if already.contains(script.name.as_str()) {
                log::debug!("skipping {} (already {})", script.name, direction);
                summary.skipped.push(script.name.clone());
                continue;
            }
            self.apply(script, batch)?;
            summary.applied.push(script.name.clone());
        }
        Ok(summary)
    }

    /// Apply exactly one named script.
    ///
    /// Resolves the script through the store and applies it with a freshly
    /// computed batch. An already-applied name is skipped unless `force` is
    /// set.
    pub fn run_one(
        &self,
        direction: Direction,
        name: &str,
        force: bool,
    ) -> EngineResult<RunSummary> {
        let script = self.store.find(name, direction)?;

        let batch = ledger::next_batch(self.db.conn())?;
        let mut summary = RunSummary {
            direction,
            batch,
            applied: Vec::new(),
            skipped: Vec::new(),
        };

        if !force {
            let already = ledger::applied_names(self.db.conn(), direction)?;
            if already.contains(script.name.as_str()) {
                log::debug!("skipping {} (already {})", script.name, direction);
                summary.skipped.push(script.name.clone());
                return Ok(summary);
            }
        }

        self.apply(&script, batch)?;
        summary.applied.push(script.name.clone());
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
