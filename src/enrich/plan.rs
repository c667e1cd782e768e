//! Outstanding-lookup planning (pure).

use super::LookupRequest;
use crate::model::ReadingLog;
use crate::state::FactStore;
use std::collections::HashSet;

/// Determine the lookups still to be issued for `listing`.
///
/// Distinct author names across all entries, then per work id a rating and a
/// subject lookup, in first-seen order. Keys the store already knows (pending,
/// resolved or missing) are skipped, so re-planning after every merge converges.
///
/// Entries without a work are skipped. Works without a usable key contribute
/// only author lookups.
pub fn plan_lookups(listing: &ReadingLog, store: &FactStore) -> Vec<LookupRequest> {
    let mut seen = HashSet::new();
    let mut planned = Vec::new();

    let mut push = |request: LookupRequest| {
        if !store.is_known(&request) && seen.insert(request.clone()) {
            planned.push(request);
        }
    };

    for work in listing.entries().iter().filter_map(|e| e.work.as_ref()) {
        for name in work.author_names.iter().filter(|n| !n.is_empty()) {
            push(LookupRequest::Author(name.clone()));
        }
        if let Some(work_id) = work.work_id() {
            push(LookupRequest::Rating(work_id.clone()));
            push(LookupRequest::Subject(work_id));
        }
    }

    planned
}
