//! Identifier newtypes with smart constructors.
//!
//! Raw constructors are never exported - use smart constructors only.

use std::fmt;

/// Canonical catalog work id (e.g. `OL45804W`).
///
/// Derived from the last path segment of a work key such as `/works/OL45804W`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkId(String);

impl WorkId {
    /// Smart constructor: validates a non-empty id without path separators.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidWorkId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidWorkId::Empty);
        }
        if raw.contains('/') {
            return Err(InvalidWorkId::ContainsSeparator(raw));
        }
        Ok(Self(raw))
    }

    /// Extract the work id from a catalog key, taking the final path segment.
    ///
    /// `"/works/OL45804W"` and `"OL45804W"` both yield `OL45804W`.
    pub fn from_key(key: &str) -> Result<Self, InvalidWorkId> {
        let last = key.rsplit('/').next().unwrap_or_default();
        Self::new(last)
    }

    /// The bare id, e.g. `OL45804W`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== Error Types =====

/// Rejected work id input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidWorkId {
    /// The id or key was empty.
    #[error("Work ID cannot be empty")]
    Empty,
    /// The id still contained a path separator.
    #[error("Work ID '{0}' must not contain '/'")]
    ContainsSeparator(String),
}

// ===== Tests =====
