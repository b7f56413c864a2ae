//! Init command implementation - scaffolds a new Mallard project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;
use crate::commands::common::validate_path_component;

/// Execute the init command
pub fn execute(args: &InitArgs) -> Result<()> {
    validate_path_component("project name", &args.name)?;

    let project_dir = Path::new(&args.name);
    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Mallard project: {}\n", args.name);

    fs::create_dir_all(project_dir.join("migrations"))
        .with_context(|| format!("Failed to create directory: {}", args.name))?;

    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let safe_db_path = args.database_path.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{name}"

migrations_path: "migrations"

database:
  path: "{db_path}"
"#,
        name = safe_name,
        db_path = safe_db_path,
    );
    fs::write(project_dir.join("mallard.yml"), config_content)
        .context("Failed to write mallard.yml")?;

    println!("  \u{2713} mallard.yml");
    println!("  \u{2713} migrations/");
    println!("\nNext steps:");
    println!("  cd {}", args.name);
    println!("  mallard new <slug>    # scaffold your first migration");
    println!("  mallard up            # apply it");
    Ok(())
}
