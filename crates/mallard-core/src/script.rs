//! Migration script types and the on-disk filename contract.
//!
//! Migration files are named `<sequence>_<slug>.<up|down>.sql`; the
//! `(sequence, slug)` stem is the logical name shared by the pair.

use crate::migration_name::MigrationName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Width of the zero-padded sequence prefix in migration filenames.
pub const SEQUENCE_WIDTH: usize = 4;

/// Direction of a migration script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply a schema change
    Up,
    /// Revert a schema change
    Down,
}

impl Direction {
    /// Filename suffix for this direction.
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Up => ".up.sql",
            Direction::Down => ".down.sql",
        }
    }

    /// Value recorded in the ledger's `direction` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A migration script loaded from disk.
#[derive(Debug, Clone)]
pub struct MigrationScript {
    /// Logical name shared by the up/down pair
    pub name: MigrationName,
    /// Which half of the pair this file is
    pub direction: Direction,
    /// Path the body was read from
    pub path: PathBuf,
    /// Raw SQL body
    pub sql: String,
}

impl MigrationScript {
    /// True if the body has no executable content.
    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }
}

/// Split a migration filename into its logical name and direction.
///
/// Returns `None` for files that are not migration scripts (wrong suffix or
/// empty stem). Whether the stem carries the required numeric sequence is
/// checked by the store, which can report the offending filename.
pub fn parse_filename(file: &str) -> Option<(MigrationName, Direction)> {
    for direction in [Direction::Up, Direction::Down] {
        if let Some(stem) = file.strip_suffix(direction.suffix()) {
            return MigrationName::try_new(stem).map(|name| (name, direction));
        }
    }
    None
}

/// Compose the on-disk filename for a name/direction pair.
pub fn script_filename(name: &str, direction: Direction) -> String {
    format!("{name}{}", direction.suffix())
}
