//! Strongly-typed migration name wrapper.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Strongly-typed wrapper for migration names of the form `<sequence>_<slug>`,
/// e.g. `0001_init`.
///
/// Prevents accidental mixing of logical names with filenames or raw SQL
/// strings. The name is shared by the up/down script pair and is the key the
/// ledger records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MigrationName(String);

impl MigrationName {
    /// Create a new `MigrationName`, panicking in debug builds if the name is
    /// empty.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        debug_assert!(!s.is_empty(), "MigrationName must not be empty");
        Self(s)
    }

    /// Try to create a new `MigrationName`, returning `None` if the name is
    /// empty.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let s = name.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Numeric sequence prefix, if the name carries one (`0002_add_col` -> 2).
    pub fn sequence(&self) -> Option<u32> {
        let prefix = self.0.split('_').next()?;
        prefix.parse().ok()
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MigrationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for MigrationName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MigrationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for MigrationName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MigrationName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for MigrationName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MigrationName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_parsed_from_prefix() {
        assert_eq!(MigrationName::new("0001_init").sequence(), Some(1));
        assert_eq!(MigrationName::new("0042_add_col").sequence(), Some(42));
    }

    #[test]
    fn test_sequence_absent_for_non_numeric_prefix() {
        assert_eq!(MigrationName::new("init").sequence(), None);
        assert_eq!(MigrationName::new("abc_init").sequence(), None);
    }

    #[test]
    fn test_display() {
        let name = MigrationName::new("0001_init");
        assert_eq!(format!("{}", name), "0001_init");
    }

    #[test]
    fn test_equality_with_str() {
        let name = MigrationName::new("0001_init");
        assert_eq!(name, "0001_init");
    }

    #[test]
    fn test_try_new_rejects_empty() {
        assert!(MigrationName::try_new("").is_none());
    }

    #[test]
    fn test_borrow_lookup_in_set() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(MigrationName::new("0001_init"));
        // Can look up by &str thanks to Borrow<str>
        assert!(set.contains("0001_init"));
        assert!(!set.contains("0002_add_col"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let name = MigrationName::new("0001_init");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, r#""0001_init""#);
        let back: MigrationName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}
