//! Down command implementation

use anyhow::Result;
use mallard_core::Direction;

use crate::cli::{DownArgs, GlobalArgs};
use crate::commands::common::{open_migrator, print_run_summary};

/// Execute the down command
pub fn execute(args: &DownArgs, global: &GlobalArgs) -> Result<()> {
    let migrator = open_migrator(global)?;

    let summary = match &args.name {
        Some(name) => migrator.run_one(Direction::Down, name, args.force)?,
        None => migrator.run_all(Direction::Down)?,
    };

    print_run_summary(&summary);
    Ok(())
}
