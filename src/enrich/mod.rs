//! Enrichment orchestration.
//!
//! [`plan_lookups`] decides which lookups are outstanding (pure), and
//! [`Dispatcher`] runs them on background threads and hands the results back to
//! the UI loop as [`Completion`]s.

pub mod dispatcher;
pub mod plan;

pub use dispatcher::Dispatcher;
pub use plan::plan_lookups;

use crate::model::{AuthorFact, CatalogError, RatingFact, ReadingLog, SubjectFact, WorkId};
use std::fmt;

/// One enrichment lookup, identified by its fact key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupRequest {
    /// Author search by display name.
    Author(String),
    /// Ratings summary for a work.
    Rating(WorkId),
    /// Work detail (subjects) for a work.
    Subject(WorkId),
}

impl fmt::Display for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupRequest::Author(name) => write!(f, "author '{name}'"),
            LookupRequest::Rating(id) => write!(f, "rating {id}"),
            LookupRequest::Subject(id) => write!(f, "subject {id}"),
        }
    }
}

/// Result of a background catalog call.
#[derive(Debug, Clone)]
pub enum Completion {
    /// The listing fetch finished.
    ReadingLog(Result<ReadingLog, CatalogError>),
    /// An author search finished.
    Author {
        /// Author name as it appears in the listing.
        name: String,
        /// Matched author, or why there is none.
        result: Result<AuthorFact, CatalogError>,
    },
    /// A rating lookup finished.
    Rating {
        /// Work looked up.
        work_id: WorkId,
        /// Rating, `None` when unrated.
        result: Result<Option<RatingFact>, CatalogError>,
    },
    /// A work detail lookup finished.
    Subject {
        /// Work looked up.
        work_id: WorkId,
        /// Primary subject, `None` when the work lists none.
        result: Result<Option<SubjectFact>, CatalogError>,
    },
}

impl Completion {
    /// The lookup this completion answers; `None` for the listing fetch.
    pub fn request(&self) -> Option<LookupRequest> {
        match self {
            Completion::ReadingLog(_) => None,
            Completion::Author { name, .. } => Some(LookupRequest::Author(name.clone())),
            Completion::Rating { work_id, .. } => Some(LookupRequest::Rating(work_id.clone())),
            Completion::Subject { work_id, .. } => Some(LookupRequest::Subject(work_id.clone())),
        }
    }
}
