//! mallard-core - Core library for Mallard
//!
//! This crate provides project configuration, the migration naming and
//! filename contract, and the script store shared by the engine and CLI.

pub mod config;
pub mod error;
pub mod migration_name;
pub mod script;
pub mod store;

pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use migration_name::MigrationName;
pub use script::{Direction, MigrationScript, SEQUENCE_WIDTH};
pub use store::{select_scripts, ScriptEntry, ScriptStore};
