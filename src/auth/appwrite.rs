//! Appwrite account API client.
//!
//! Sessions are cookie based: the cookies set by `POST /account/sessions/email`
//! are kept in memory and replayed on later calls.

use super::{AuthProvider, Session, User};
use crate::catalog::http::build_agent;
use crate::model::AuthError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

const PROJECT_HEADER: &str = "X-Appwrite-Project";

/// [`AuthProvider`] backed by the Appwrite account API.
///
/// The session cookie returned at login is replayed on later requests.
pub struct AppwriteAuth {
    agent: ureq::Agent,
    endpoint: String,
    project: String,
    cookies: Option<String>,
}

impl AppwriteAuth {
    /// `endpoint` is the API root, e.g. `https://cloud.appwrite.io/v1`.
    pub fn new(
        endpoint: impl Into<String>,
        project: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            agent: build_agent(timeout),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project: project.into(),
            cookies: None,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    fn cookie_value(&self) -> &str {
        self.cookies.as_deref().unwrap_or_default()
    }
}

impl AuthProvider for AppwriteAuth {
    fn current_user(&self) -> Result<User, AuthError> {
        let mut request = self
            .agent
            .get(&self.url("/account"))
            .header(PROJECT_HEADER, self.project.as_str());
        if self.cookies.is_some() {
            request = request.header("Cookie", self.cookie_value());
        }
        let mut response = request.call().map_err(session_check_error)?;
        read_json(response.body_mut())
    }

    fn create_session(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut response = self
            .agent
            .post(&self.url("/account/sessions/email"))
            .header(PROJECT_HEADER, self.project.as_str())
            .send_json(serde_json::json!({ "email": email, "password": password }))
            .map_err(request_error)?;

        let set_cookies = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if let Some(cookies) = cookie_header(set_cookies.iter().map(String::as_str)) {
            self.cookies = Some(cookies);
        }

        let session: Session = read_json(response.body_mut())?;
        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    fn delete_session(&mut self) -> Result<(), AuthError> {
        let mut request = self
            .agent
            .delete(&self.url("/account/sessions/current"))
            .header(PROJECT_HEADER, self.project.as_str());
        if self.cookies.is_some() {
            request = request.header("Cookie", self.cookie_value());
        }
        request.call().map_err(request_error)?;
        self.cookies = None;
        debug!("session deleted");
        Ok(())
    }
}

/// Collapse `Set-Cookie` header values into a single `Cookie` header value.
///
/// Attributes (`Path`, `Expires`, ...) are dropped; only `name=value` pairs are kept.
pub fn cookie_header<'a>(set_cookies: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let pairs: Vec<&str> = set_cookies
        .into_iter()
        .filter_map(|raw| raw.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect();
    (!pairs.is_empty()).then(|| pairs.join("; "))
}

fn read_json<T: DeserializeOwned>(body: &mut ureq::Body) -> Result<T, AuthError> {
    body.read_json::<T>().map_err(|e| AuthError::Parse {
        reason: e.to_string(),
    })
}

fn session_check_error(err: ureq::Error) -> AuthError {
    match err {
        ureq::Error::StatusCode(401) => AuthError::Unauthenticated,
        other => request_error(other),
    }
}

fn request_error(err: ureq::Error) -> AuthError {
    match err {
        ureq::Error::StatusCode(status) => AuthError::Rejected { status },
        other => AuthError::Network {
            reason: other.to_string(),
        },
    }
}
