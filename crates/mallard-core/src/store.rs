//! Script store: discovery and ordering of migration files.
//!
//! Directory scans are re-run on every call so file changes between
//! invocations are always observed. Ordering and filename validation live in
//! [`select_scripts`], a pure function over a borrowed listing, so the logic
//! is testable without filesystem access.

use crate::error::{CoreError, CoreResult};
use crate::migration_name::MigrationName;
use crate::script::{parse_filename, script_filename, Direction, MigrationScript, SEQUENCE_WIDTH};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads paired migration scripts from a single directory.
pub struct ScriptStore {
    dir: PathBuf,
}

/// One selected entry from a directory listing: filename plus parsed identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    /// Logical name (`<sequence>_<slug>`)
    pub name: MigrationName,
    /// Direction parsed from the filename suffix
    pub direction: Direction,
    /// Numeric sequence prefix
    pub sequence: u32,
    /// The filename the entry came from
    pub file: String,
}

/// Select and order the migration files for `direction` out of a raw listing.
///
/// Ascending by `(sequence, filename)`. Files without a migration suffix are
/// ignored; migration files whose stem lacks a numeric sequence prefix are an
/// [`InvalidFilename`](CoreError::InvalidFilename) error.
pub fn select_scripts(files: &[String], direction: Direction) -> CoreResult<Vec<ScriptEntry>> {
    let mut entries = Vec::new();
    for file in files {
        let Some((name, parsed_direction)) = parse_filename(file) else {
            continue;
        };
        let sequence = name
            .sequence()
            .ok_or_else(|| CoreError::InvalidFilename { file: file.clone() })?;
        if parsed_direction != direction {
            continue;
        }
        entries.push(ScriptEntry {
            name,
            direction: parsed_direction,
            sequence,
            file: file.clone(),
        });
    }
    entries.sort_by(|a, b| {
        a.sequence
            .cmp(&b.sequence)
            .then_with(|| a.file.cmp(&b.file))
    });
    Ok(entries)
}

impl ScriptStore {
    /// Create a store over `dir`. The directory is not touched until a
    /// listing or lookup is requested.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List all scripts for `direction`, ascending by `(sequence, filename)`.
    ///
    /// Scans the directory fresh on every call; bodies are loaded eagerly.
    pub fn list(&self, direction: Direction) -> CoreResult<Vec<MigrationScript>> {
        let listing = self.scan()?;
        select_scripts(&listing, direction)?
            .into_iter()
            .map(|entry| self.load(entry.name, entry.direction, &entry.file))
            .collect()
    }

    /// Exact lookup of one script by logical name and direction.
    pub fn find(&self, name: &str, direction: Direction) -> CoreResult<MigrationScript> {
        let file = script_filename(name, direction);
        let path = self.dir.join(&file);
        if !path.is_file() {
            return Err(CoreError::ScriptNotFound { file });
        }
        let name = MigrationName::try_new(name)
            .ok_or_else(|| CoreError::InvalidFilename { file: file.clone() })?;
        self.load(name, direction, &file)
    }

    /// Next free sequence number, zero-padded to [`SEQUENCE_WIDTH`].
    ///
    /// Scans every migration file regardless of direction so an up-only
    /// migration still reserves its number.
    pub fn next_version(&self) -> CoreResult<String> {
        let listing = self.scan()?;
        let max = listing
            .iter()
            .filter_map(|file| parse_filename(file))
            .filter_map(|(name, _)| name.sequence())
            .max()
            .unwrap_or(0);
        Ok(format!("{:0width$}", max + 1, width = SEQUENCE_WIDTH))
    }

    fn scan(&self) -> CoreResult<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: self.dir.display().to_string(),
            });
        }
        let read_dir = fs::read_dir(&self.dir).map_err(|e| CoreError::IoWithPath {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| CoreError::IoWithPath {
                path: self.dir.display().to_string(),
                source: e,
            })?;
            if !entry.path().is_file() {
                log::debug!("skipping non-file entry: {}", entry.path().display());
                continue;
            }
            if let Some(file) = entry.file_name().to_str() {
                files.push(file.to_string());
            }
        }
        Ok(files)
    }

    fn load(
        &self,
        name: MigrationName,
        direction: Direction,
        file: &str,
    ) -> CoreResult<MigrationScript> {
        let path = self.dir.join(file);
        let sql = fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(MigrationScript {
            name,
            direction,
            path,
            sql,
        })
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
