//! New command implementation - scaffolds a paired up/down migration

use anyhow::{Context, Result};
use chrono::Utc;
use mallard_core::script::script_filename;
use mallard_core::{Direction, ScriptStore};
use std::fs;

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::{load_project, validate_path_component};

/// Execute the new command
pub fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    validate_path_component("migration slug", &args.slug)?;

    let project = load_project(global)?;
    let dir = project.config.migrations_path_absolute(&project.root);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create migrations directory: {}", dir.display()))?;

    let store = ScriptStore::new(&dir);
    let version = store.next_version()?;
    let base = format!("{}_{}", version, args.slug);
    let stamp = Utc::now().format("%Y-%m-%d");

    let up_file = dir.join(script_filename(&base, Direction::Up));
    let down_file = dir.join(script_filename(&base, Direction::Down));

    let up_template = format!("-- Migration: {base} (created {stamp})\n-- Write your schema change here\n");
    let down_template = format!("-- Migration: {base} (created {stamp})\n-- Write the inverse change here\n");

    fs::write(&up_file, up_template)
        .with_context(|| format!("Failed to write {}", up_file.display()))?;
    fs::write(&down_file, down_template)
        .with_context(|| format!("Failed to write {}", down_file.display()))?;

    println!("Created: {}", up_file.display());
    println!("Created: {}", down_file.display());
    Ok(())
}
