//! Error types for mallard-core

use thiserror::Error;

/// Core error type for Mallard
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Migrations directory not found
    #[error("[E004] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// E005: No script on disk for the requested name and direction
    #[error("[E005] Migration script not found: {file}")]
    ScriptNotFound { file: String },

    /// E006: Migration file does not follow the filename contract
    #[error(
        "[E006] Invalid migration filename '{file}': expected <sequence>_<slug>.<up|down>.sql \
         with a numeric sequence"
    )]
    InvalidFilename { file: String },

    /// E007: IO error with the offending path attached
    #[error("[E007] IO error on {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for [`CoreError`]
pub type CoreResult<T> = Result<T, CoreError>;
