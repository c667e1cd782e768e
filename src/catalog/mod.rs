//! Remote catalog client.
//!
//! [`CatalogClient`] is the seam between the enrichment pipeline and the network.
//! The HTTP implementation lives in [`http`]; tests substitute in-memory fakes.
//!
//! Interpretation of response bodies (author matching, rating rounding, subject
//! extraction) is done by pure functions over the wire types below so it can be
//! tested without a server.

pub mod http;

pub use http::HttpCatalogClient;

use crate::model::{AuthorFact, CatalogError, RatingFact, ReadingLog, SubjectFact, WorkId};
use serde::Deserialize;

/// Read-only catalog operations. All calls are idempotent.
///
/// Implementations must be shareable across the lookup threads.
pub trait CatalogClient: Send + Sync {
    /// Fetch the user's already-read listing.
    fn fetch_reading_log(&self) -> Result<ReadingLog, CatalogError>;

    /// Search authors by name and return the first case-insensitive match.
    ///
    /// # Errors
    ///
    /// `CatalogError::NotFound` when no search result matches `name`.
    fn fetch_author(&self, name: &str) -> Result<AuthorFact, CatalogError>;

    /// Look up the average rating of a work. `Ok(None)` when the work is unrated.
    fn fetch_work_rating(&self, work_id: &WorkId) -> Result<Option<RatingFact>, CatalogError>;

    /// Look up work details and extract the primary subject.
    fn fetch_work_detail(&self, work_id: &WorkId) -> Result<Option<SubjectFact>, CatalogError>;
}

// ===== Endpoints =====

/// URL layout of the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    base_url: String,
    user: String,
}

impl CatalogEndpoints {
    /// Trailing slashes on `base_url` are ignored.
    pub fn new(base_url: impl Into<String>, user: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            user: user.into(),
        }
    }

    /// The user's already-read listing.
    pub fn reading_log_url(&self) -> String {
        format!(
            "{}/people/{}/books/already-read.json",
            self.base_url, self.user
        )
    }

    /// Author search URL without the query string; the name is passed as `q`.
    pub fn author_search_url(&self) -> String {
        format!("{}/search/authors.json", self.base_url)
    }

    /// Rating summary of one work.
    pub fn ratings_url(&self, work_id: &WorkId) -> String {
        format!("{}/works/{}/ratings.json", self.base_url, work_id)
    }

    /// Detail record of one work.
    pub fn work_url(&self, work_id: &WorkId) -> String {
        format!("{}/works/{}.json", self.base_url, work_id)
    }
}

// ===== Wire types =====

/// Body of `/search/authors.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorSearchResponse {
    /// Search hits in relevance order.
    #[serde(default)]
    pub docs: Vec<AuthorDoc>,
}

/// One author search hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorDoc {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-form birth date, e.g. `8 October 1920`.
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Title of the author's best-known work.
    #[serde(default)]
    pub top_work: Option<String>,
}

/// Body of `/works/{id}/ratings.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingsResponse {
    /// Aggregate over all ratings; absent for unrated works.
    #[serde(default)]
    pub summary: Option<RatingsSummary>,
}

/// Aggregate rating figures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingsSummary {
    /// Mean rating on a 1-5 scale.
    #[serde(default)]
    pub average: Option<f64>,
}

/// Body of `/works/{id}.json` (only the fields we read).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkDetailResponse {
    /// Subject headings, most specific first.
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
}

// ===== Interpretation =====

/// Pick the first search result whose name equals `name` ignoring case.
///
/// Several authors can share a name; the first match wins.
pub fn match_author(
    name: &str,
    response: &AuthorSearchResponse,
) -> Result<AuthorFact, CatalogError> {
    let wanted = name.to_lowercase();
    response
        .docs
        .iter()
        .find(|doc| doc.name.to_lowercase() == wanted)
        .map(|doc| AuthorFact::new(doc.birth_date.as_deref(), doc.top_work.as_deref()))
        .ok_or_else(|| CatalogError::NotFound {
            name: name.to_string(),
        })
}

/// Rounded average rating, or `None` for an unrated work.
pub fn rating_from_response(response: &RatingsResponse) -> Option<RatingFact> {
    response
        .summary
        .as_ref()
        .and_then(|s| s.average)
        .and_then(RatingFact::from_average)
}

/// Primary subject, or `None` when the work lists none.
pub fn subject_from_response(response: &WorkDetailResponse) -> Option<SubjectFact> {
    response
        .subjects
        .as_deref()
        .and_then(SubjectFact::from_subjects)
}
