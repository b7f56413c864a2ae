//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Mallard - batch-oriented SQL schema migrations for DuckDB
#[derive(Parser, Debug)]
#[command(name = "mallard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override the target database path from mallard.yml
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new Mallard project
    Init(InitArgs),

    /// Scaffold a paired up/down migration with the next sequence number
    New(NewArgs),

    /// Apply all pending migrations, or one named migration
    Up(UpArgs),

    /// Revert all applied migrations in reverse order, or one named migration
    Down(DownArgs),

    /// Revert one batch of migrations, defaulting to the most recent
    Rollback(RollbackArgs),

    /// Show which migrations are applied and which are pending
    Status(StatusArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project directory to create
    pub name: String,

    /// Target database path written into mallard.yml
    #[arg(long, default_value = "./mallard.duckdb")]
    pub database_path: String,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Slug for the migration (becomes `<sequence>_<slug>.up.sql` / `.down.sql`)
    pub slug: String,
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Apply only this named migration (e.g. 0001_init)
    pub name: Option<String>,

    /// Reapply even if the ledger already records the migration
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the down command
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Revert only this named migration (e.g. 0001_init)
    pub name: Option<String>,

    /// Re-run the down script even if the ledger already records it
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the rollback command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Batch number to revert (default: the most recent batch)
    pub batch: Option<i64>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
