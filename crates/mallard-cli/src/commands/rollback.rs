//! Rollback command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, RollbackArgs};
use crate::commands::common::open_migrator;

/// Execute the rollback command
pub fn execute(args: &RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let migrator = open_migrator(global)?;

    let summary = migrator.rollback(args.batch)?;
    match summary.batch {
        None => println!("Nothing to rollback."),
        Some(batch) => {
            for name in &summary.reverted {
                println!("  \u{2713} reverted {}", name);
            }
            println!(
                "Rolled back batch {} ({} migration(s))",
                batch,
                summary.reverted.len()
            );
        }
    }
    Ok(())
}
