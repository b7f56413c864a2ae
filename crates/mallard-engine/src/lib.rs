//! Migration engine for Mallard.
//!
//! Applies and reverts paired up/down SQL scripts against a DuckDB target,
//! recording every successful execution in the `mallard.migrations` ledger
//! inside the same transaction as the script body. The ledger is the source
//! of truth for "already applied" and the unit of batch rollback.
//!
//! The engine is single-writer by design: one process runs one migration
//! command at a time, and execution within a run is strictly sequential.
//! `next_batch` reads then inserts without cross-process locking, so callers
//! must serialize invocations externally (a deployment-pipeline mutex or an
//! advisory lock). Scripts have no execution timeout and a run is never
//! interrupted mid-transaction: a process killed mid-script leaves an
//! uncommitted transaction for the database to discard, so the schema and
//! ledger cannot diverge for a single script.

pub mod connection;
pub mod error;
pub mod ledger;
pub mod rollback;
pub mod runner;

pub use connection::MigrationDb;
pub use error::{EngineError, EngineResult};
pub use ledger::{LedgerEntry, DOWN_SENTINEL_BATCH};
pub use rollback::RollbackSummary;
pub use runner::{Migrator, RunSummary};
