//! Batch rollback: undo one batch's members in reverse application order.

use crate::error::{EngineError, EngineResult};
use crate::ledger;
use crate::runner::Migrator;
use mallard_core::{CoreError, Direction, MigrationName};
use serde::Serialize;

/// Outcome of a rollback invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RollbackSummary {
    /// Batch that was rolled back, `None` when there was nothing to do
    pub batch: Option<i64>,
    /// Names reverted, most recently applied first
    pub reverted: Vec<MigrationName>,
}

impl Migrator {
    /// Revert one batch: the given one, or the most recent.
    ///
    /// Members are undone most-recently-applied first; each member's down
    /// script runs through [`apply`](Migrator::apply) and, once it commits,
    /// both of the member's ledger rows are deleted. A missing down script
    /// aborts the remaining rollback immediately: members already reverted
    /// stay reverted, the failing member and any after it stay applied.
    ///
    /// A bare rollback against an empty ledger is a no-op; an explicitly
    /// requested batch with no recorded members is an error.
    pub fn rollback(&self, target: Option<i64>) -> EngineResult<RollbackSummary> {
        let batch = match target {
            Some(batch) => batch,
            None => match ledger::last_batch(self.db().conn())? {
                Some(batch) => batch,
                None => {
                    log::info!("nothing to rollback");
                    return Ok(RollbackSummary {
                        batch: None,
                        reverted: Vec::new(),
                    });
                }
            },
        };

        let members = ledger::members_of_batch(self.db().conn(), batch)?;
        if members.is_empty() {
            return Err(EngineError::NoBatchToRollback { batch });
        }

        log::debug!("rolling back batch {batch} ({} members)", members.len());
        let mut reverted = Vec::new();
        for name in members {
            let script = match self.store().find(name.as_str(), Direction::Down) {
                Ok(script) => script,
                Err(CoreError::ScriptNotFound { .. }) => {
                    return Err(EngineError::MissingDownScript {
                        name: name.to_string(),
                    });
                }
                Err(other) => return Err(other.into()),
            };
            self.apply(&script, batch)?;
            ledger::delete_entries(self.db().conn(), &name)?;
            reverted.push(name);
        }

        Ok(RollbackSummary {
            batch: Some(batch),
            reverted,
        })
    }
}

#[cfg(test)]
#[path = "rollback_test.rs"]
mod tests;
