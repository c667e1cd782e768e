//! Accumulated enrichment facts.
//!
//! One mapping per enrichment category. Every key moves through
//! `Pending → Resolved | Missing` and is never removed, so a key is looked up at
//! most once per dashboard visit.

use crate::enrich::LookupRequest;
use crate::model::{AuthorFact, RatingFact, SubjectFact, WorkId};
use std::collections::HashMap;
use std::hash::Hash;

/// Lookup state of a single key.
#[derive(Debug, Clone, PartialEq)]
pub enum FactSlot<T> {
    /// Lookup issued, not yet completed.
    Pending,
    /// Lookup produced a fact.
    Resolved(T),
    /// Lookup completed without a fact (not found, unrated, or failed).
    Missing,
}

impl<T> FactSlot<T> {
    /// The fact, if resolved.
    pub fn resolved(&self) -> Option<&T> {
        match self {
            FactSlot::Resolved(fact) => Some(fact),
            _ => None,
        }
    }
}

/// Key-value store of enrichment facts owned by the dashboard.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    authors: HashMap<String, FactSlot<AuthorFact>>,
    ratings: HashMap<WorkId, FactSlot<RatingFact>>,
    subjects: HashMap<WorkId, FactSlot<SubjectFact>>,
}

impl FactStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Reads =====

    /// Resolved fact for an author name.
    pub fn author(&self, name: &str) -> Option<&AuthorFact> {
        self.authors.get(name).and_then(FactSlot::resolved)
    }

    /// Resolved rating for a work.
    pub fn rating(&self, work_id: &WorkId) -> Option<&RatingFact> {
        self.ratings.get(work_id).and_then(FactSlot::resolved)
    }

    /// Resolved subject for a work.
    pub fn subject(&self, work_id: &WorkId) -> Option<&SubjectFact> {
        self.subjects.get(work_id).and_then(FactSlot::resolved)
    }

    /// True when the request's key has any slot (pending, resolved or missing).
    pub fn is_known(&self, request: &LookupRequest) -> bool {
        match request {
            LookupRequest::Author(name) => self.authors.contains_key(name),
            LookupRequest::Rating(id) => self.ratings.contains_key(id),
            LookupRequest::Subject(id) => self.subjects.contains_key(id),
        }
    }

    /// Number of lookups still in flight.
    pub fn pending_count(&self) -> usize {
        fn count<K, T>(map: &HashMap<K, FactSlot<T>>) -> usize {
            map.values()
                .filter(|slot| matches!(slot, FactSlot::Pending))
                .count()
        }
        count(&self.authors) + count(&self.ratings) + count(&self.subjects)
    }

    // ===== Merges =====

    /// Record that a lookup has been issued. No-op if the key already has a slot.
    pub fn mark_pending(&mut self, request: &LookupRequest) {
        match request {
            LookupRequest::Author(name) => {
                self.authors.entry(name.clone()).or_insert(FactSlot::Pending);
            }
            LookupRequest::Rating(id) => {
                self.ratings.entry(id.clone()).or_insert(FactSlot::Pending);
            }
            LookupRequest::Subject(id) => {
                self.subjects.entry(id.clone()).or_insert(FactSlot::Pending);
            }
        }
    }

    /// Store an author fact. The first resolution wins.
    pub fn merge_author(&mut self, name: impl Into<String>, fact: AuthorFact) {
        resolve(&mut self.authors, name.into(), fact);
    }

    /// Store a rating fact. The first resolution wins.
    pub fn merge_rating(&mut self, work_id: WorkId, fact: RatingFact) {
        resolve(&mut self.ratings, work_id, fact);
    }

    /// Store a subject fact. The first resolution wins.
    pub fn merge_subject(&mut self, work_id: WorkId, fact: SubjectFact) {
        resolve(&mut self.subjects, work_id, fact);
    }

    /// Close a lookup that produced no fact. Never overwrites a resolved fact.
    pub fn record_missing(&mut self, request: &LookupRequest) {
        match request {
            LookupRequest::Author(name) => settle_missing(&mut self.authors, name.clone()),
            LookupRequest::Rating(id) => settle_missing(&mut self.ratings, id.clone()),
            LookupRequest::Subject(id) => settle_missing(&mut self.subjects, id.clone()),
        }
    }
}

fn resolve<K: Eq + Hash, T>(map: &mut HashMap<K, FactSlot<T>>, key: K, fact: T) {
    let slot = map.entry(key).or_insert(FactSlot::Pending);
    if !matches!(slot, FactSlot::Resolved(_)) {
        *slot = FactSlot::Resolved(fact);
    }
}

fn settle_missing<K: Eq + Hash, T>(map: &mut HashMap<K, FactSlot<T>>, key: K) {
    let slot = map.entry(key).or_insert(FactSlot::Missing);
    if matches!(slot, FactSlot::Pending) {
        *slot = FactSlot::Missing;
    }
}

#[cfg(test)]
#[path = "fact_store_tests.rs"]
mod tests;
