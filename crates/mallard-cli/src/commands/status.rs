//! Status command implementation

use anyhow::Result;
use mallard_core::Direction;
use mallard_engine::ledger;
use serde::Serialize;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::open_migrator;

/// One line of status output: a migration on disk joined with its ledger
/// state.
#[derive(Debug, Serialize)]
struct StatusRow {
    name: String,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    executed_at: Option<String>,
}

/// Execute the status command
pub fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let migrator = open_migrator(global)?;

    let scripts = migrator.store().list(Direction::Up)?;
    let entries = ledger::entries(migrator.db().conn())?;

    let mut rows: Vec<StatusRow> = Vec::new();
    for script in &scripts {
        // Latest up row wins when force-reapply left more than one.
        let applied = entries
            .iter()
            .rev()
            .find(|e| e.direction == Direction::Up && e.name == script.name);
        rows.push(match applied {
            Some(entry) => StatusRow {
                name: script.name.to_string(),
                state: "applied",
                batch: Some(entry.batch),
                executed_at: Some(entry.executed_at.clone()),
            },
            None => StatusRow {
                name: script.name.to_string(),
                state: "pending",
                batch: None,
                executed_at: None,
            },
        });
    }

    // Ledger rows with no up script left on disk are surfaced rather than
    // silently dropped.
    for entry in &entries {
        if entry.direction == Direction::Up
            && !scripts.iter().any(|s| s.name == entry.name)
            && !rows.iter().any(|r| r.name == entry.name.as_str())
        {
            rows.push(StatusRow {
                name: entry.name.to_string(),
                state: "missing on disk",
                batch: Some(entry.batch),
                executed_at: Some(entry.executed_at.clone()),
            });
        }
    }

    match args.output {
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        StatusOutput::Table => {
            println!(
                "{:<32} {:<16} {:>5}  {}",
                "NAME", "STATE", "BATCH", "EXECUTED AT"
            );
            for row in &rows {
                println!(
                    "{:<32} {:<16} {:>5}  {}",
                    row.name,
                    row.state,
                    row.batch.map(|b| b.to_string()).unwrap_or_default(),
                    row.executed_at.as_deref().unwrap_or("")
                );
            }
        }
    }
    Ok(())
}
