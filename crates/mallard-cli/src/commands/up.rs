//! Up command implementation

use anyhow::Result;
use mallard_core::Direction;

use crate::cli::{GlobalArgs, UpArgs};
use crate::commands::common::{open_migrator, print_run_summary};

/// Execute the up command
pub fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let migrator = open_migrator(global)?;

    let summary = match &args.name {
        Some(name) => migrator.run_one(Direction::Up, name, args.force)?,
        None => migrator.run_all(Direction::Up)?,
    };

    print_run_summary(&summary);
    Ok(())
}
