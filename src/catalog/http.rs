//! Blocking HTTP implementation of [`CatalogClient`] over `ureq`.
//!
//! Calls are made from the enrichment dispatcher's background threads, never
//! from the UI thread.

use super::{
    match_author, rating_from_response, subject_from_response, AuthorSearchResponse,
    CatalogClient, CatalogEndpoints, RatingsResponse, WorkDetailResponse,
};
use crate::model::{AuthorFact, CatalogError, RatingFact, ReadingLog, SubjectFact, WorkId};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Build a `ureq` agent with an optional global timeout.
///
/// `None` leaves requests unbounded.
pub fn build_agent(timeout: Option<Duration>) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(timeout)
        .build();
    config.into()
}

/// Catalog client talking to an Open Library compatible server.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    agent: ureq::Agent,
    endpoints: CatalogEndpoints,
}

impl HttpCatalogClient {
    /// Client for `endpoints`; `timeout` bounds each request.
    pub fn new(endpoints: CatalogEndpoints, timeout: Option<Duration>) -> Self {
        Self {
            agent: build_agent(timeout),
            endpoints,
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: Option<(&str, &str)>,
    ) -> Result<T, CatalogError> {
        debug!(url, "catalog request");
        let request = self.agent.get(url);
        let request = match query {
            Some((key, value)) => request.query(key, value),
            None => request,
        };
        let mut response = request.call().map_err(|e| transport_error(url, e))?;
        response
            .body_mut()
            .read_json::<T>()
            .map_err(|e| body_error(url, e))
    }
}

impl CatalogClient for HttpCatalogClient {
    fn fetch_reading_log(&self) -> Result<ReadingLog, CatalogError> {
        self.get_json(&self.endpoints.reading_log_url(), None)
    }

    fn fetch_author(&self, name: &str) -> Result<AuthorFact, CatalogError> {
        let response: AuthorSearchResponse =
            self.get_json(&self.endpoints.author_search_url(), Some(("q", name)))?;
        match_author(name, &response)
    }

    fn fetch_work_rating(&self, work_id: &WorkId) -> Result<Option<RatingFact>, CatalogError> {
        let response: RatingsResponse = self.get_json(&self.endpoints.ratings_url(work_id), None)?;
        Ok(rating_from_response(&response))
    }

    fn fetch_work_detail(&self, work_id: &WorkId) -> Result<Option<SubjectFact>, CatalogError> {
        let response: WorkDetailResponse = self.get_json(&self.endpoints.work_url(work_id), None)?;
        Ok(subject_from_response(&response))
    }
}

fn transport_error(url: &str, err: ureq::Error) -> CatalogError {
    match err {
        ureq::Error::StatusCode(status) => CatalogError::Status {
            url: url.to_string(),
            status,
        },
        other => CatalogError::Network {
            url: url.to_string(),
            reason: other.to_string(),
        },
    }
}

fn body_error(url: &str, err: ureq::Error) -> CatalogError {
    match err {
        ureq::Error::Json(e) => CatalogError::Parse {
            url: url.to_string(),
            reason: e.to_string(),
        },
        other => CatalogError::Network {
            url: url.to_string(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_maps_to_status_error() {
        let err = transport_error("https://example.test/x.json", ureq::Error::StatusCode(404));
        assert_eq!(
            err,
            CatalogError::Status {
                url: "https://example.test/x.json".to_string(),
                status: 404
            }
        );
    }

    #[test]
    fn json_error_maps_to_parse_error() {
        let json_err = serde_json::from_str::<ReadingLog>("not json").unwrap_err();
        let err = body_error("https://example.test/x.json", ureq::Error::Json(json_err));
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = HttpCatalogClient::new(
            CatalogEndpoints::new("http://127.0.0.1:9", "nobody"),
            Some(Duration::from_secs(2)),
        );
        let err = client.fetch_reading_log().unwrap_err();
        assert!(
            matches!(err, CatalogError::Network { .. }),
            "expected network error, got {err:?}"
        );
    }
}
