//! Error types for the migration engine.

use thiserror::Error;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open the target database (M001).
    #[error("[M001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Ledger schema bootstrap failed (M002).
    #[error("[M002] Ledger schema setup failed: {0}")]
    SchemaError(String),

    /// Ledger read failed (M003).
    #[error("[M003] Ledger query failed: {0}")]
    QueryError(String),

    /// Transaction management error (M004).
    #[error("[M004] Transaction failed: {0}")]
    TransactionError(String),

    /// The database rejected a script body (M005).
    #[error("[M005] Migration '{name}' failed: {message}")]
    ExecutionFailure { name: String, message: String },

    /// A ledger insert or delete failed (M006).
    #[error("[M006] Ledger write for '{name}' failed: {message}")]
    LedgerWriteFailure { name: String, message: String },

    /// A script file has no executable content (M007).
    #[error("[M007] Migration '{name}' has an empty script: {path}")]
    EmptyScript { name: String, path: String },

    /// Rollback needs a down script that does not exist (M008).
    #[error("[M008] Missing down script for migration '{name}'")]
    MissingDownScript { name: String },

    /// An explicitly requested batch has nothing recorded (M009).
    #[error("[M009] No batch to rollback: batch {batch} has no applied migrations")]
    NoBatchToRollback { batch: i64 },

    /// Script store error.
    #[error(transparent)]
    Script(#[from] mallard_core::CoreError),
}

/// Result type alias for [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;
