//! Reading-log records as delivered by the catalog.
//!
//! These types mirror the JSON of `/people/{user}/books/already-read.json`.
//! Missing and `null` fields fall back to their defaults, and an entry that
//! still cannot be decoded becomes an empty entry. A single odd entry never
//! fails the whole listing; unusable entries are filtered out by the projection.

use super::identifiers::WorkId;
use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decodes each entry on its own so a malformed one degrades to an empty entry.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<ReadingLogEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|value| ReadingLogEntry::deserialize(value).unwrap_or_default())
        .collect())
}

/// A catalog work: a book title independent of edition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Work {
    /// Catalog key, e.g. `/works/OL45804W`.
    #[serde(default)]
    pub key: Option<String>,

    /// Display title; empty when the catalog sent none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Display names in catalog order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_names: Vec<String>,

    /// Year of first publication, if known.
    #[serde(default)]
    pub first_publish_year: Option<i32>,

    /// Subject headings embedded in the listing, if any.
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
}

impl Work {
    /// Canonical work id derived from `key`, if the key is present and well-formed.
    pub fn work_id(&self) -> Option<WorkId> {
        self.key.as_deref().and_then(|k| WorkId::from_key(k).ok())
    }

    /// True when the work can be shown as a table row.
    ///
    /// Requires a non-empty title and at least one author.
    pub fn is_displayable(&self) -> bool {
        !self.title.is_empty() && !self.author_names.is_empty()
    }
}

/// One recorded interaction of the user with a work.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ReadingLogEntry {
    /// The work read; absent for entries the catalog could not resolve.
    #[serde(default)]
    pub work: Option<Work>,
}

impl ReadingLogEntry {
    /// The work, if this entry survives the projection filter.
    pub fn displayable_work(&self) -> Option<&Work> {
        self.work.as_ref().filter(|w| w.is_displayable())
    }
}

/// The full reading-log listing. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ReadingLog {
    /// Entries in catalog order.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub reading_log_entries: Vec<ReadingLogEntry>,
}

impl ReadingLog {
    /// Wraps already-decoded entries.
    pub fn new(entries: Vec<ReadingLogEntry>) -> Self {
        Self {
            reading_log_entries: entries,
        }
    }

    /// Entries in catalog order, including ones the projection will drop.
    pub fn entries(&self) -> &[ReadingLogEntry] {
        &self.reading_log_entries
    }

    /// True when the catalog returned no entries at all.
    pub fn is_empty(&self) -> bool {
        self.reading_log_entries.is_empty()
    }
}
