//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mallard_core::{Config, Direction, ScriptStore};
use mallard_engine::{MigrationDb, Migrator, RunSummary};
use std::path::PathBuf;

use crate::cli::GlobalArgs;

/// Resolved project context: config plus its root directory.
pub(crate) struct ProjectContext {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

/// Load mallard.yml from the project directory.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<ProjectContext> {
    let root = PathBuf::from(&global.project_dir);
    let config = Config::load_from_dir(&root).context("Failed to load project config")?;
    Ok(ProjectContext { root, config })
}

/// Open the target database and construct a migrator over the project's
/// migrations directory.
pub(crate) fn open_migrator(global: &GlobalArgs) -> Result<Migrator> {
    let project = load_project(global)?;

    let db_path = match &global.database {
        Some(path) => path.clone(),
        None => project.config.database_path_resolved(&project.root),
    };
    log::debug!("opening target database at {db_path}");
    if global.verbose {
        println!("database: {db_path}");
    }
    let db = MigrationDb::open_str(&db_path)
        .with_context(|| format!("Failed to open database: {db_path}"))?;

    let store = ScriptStore::new(project.config.migrations_path_absolute(&project.root));
    if global.verbose {
        println!("migrations: {}", store.dir().display());
    }
    Ok(Migrator::new(db, store))
}

/// Print the per-script lines and the closing line for a run summary.
pub(crate) fn print_run_summary(summary: &RunSummary) {
    for name in &summary.skipped {
        println!("  - {} (already {})", name, summary.direction);
    }
    for name in &summary.applied {
        println!("  \u{2713} {}", name);
    }
    match summary.direction {
        Direction::Up => println!(
            "Applied {} migration(s) in batch {}",
            summary.applied.len(),
            summary.batch
        ),
        Direction::Down => println!("Reverted {} migration(s)", summary.applied.len()),
    }
}

/// Reject names that could cause path traversal or confusing filenames.
pub(crate) fn validate_path_component(kind: &str, value: &str) -> Result<()> {
    if value.is_empty()
        || value.contains('/')
        || value.contains('\\')
        || value.contains("..")
        || value.starts_with('.')
        || value.starts_with('-')
    {
        anyhow::bail!(
            "Invalid {kind} '{value}': must not contain '/', '\\', '..', or start with '.' or '-'"
        );
    }
    Ok(())
}
