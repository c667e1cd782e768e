//! Error types for bookdash.
//!
//! Errors are grouped by the collaborator that produces them and compose via
//! `From` conversions so the impure shell can use `?` throughout.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the TUI entry point
//!   - `ConfigError` - Config file could not be read or parsed
//!   - `LoggingError` - Log file could not be set up
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`AuthError`] - Session provider failures, shown on the login form
//! - [`ExportError`] - Writing `books.csv` failed, shown in the status line
//! - [`CatalogError`] - Catalog lookups (never escapes the UI loop)
//!
//! # Recovery Strategy
//!
//! Catalog failures are **non-fatal**. A failed listing fetch turns into a visible
//! "Error fetching data" state; failed enrichment lookups are logged and the
//! corresponding cell shows "Unknown". Authentication failures are shown inline on
//! the login form or cause a silent redirect to it. Only terminal errors are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file exists but is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log file setup failed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the dashboard cannot function, so this is fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures talking to the reading-log catalog.
///
/// `Network` and `Status` are transport failures, `Parse` means the body was not
/// the expected JSON shape, and `NotFound` is the author search returning no
/// case-insensitive match.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced an HTTP response.
    #[error("Network failure for {url}: {reason}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error details.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("Catalog returned HTTP {status} for {url}")]
    Status {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Failed to parse response from {url}: {reason}")]
    Parse {
        /// Request URL.
        url: String,
        /// Decoder error details.
        reason: String,
    },

    /// Author search produced no record whose name matches the query.
    #[error("No author matching '{name}'")]
    NotFound {
        /// The author name as it appears in the reading log.
        name: String,
    },
}

/// Failures from the session provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No active session. Protected routes redirect to login.
    #[error("No active session")]
    Unauthenticated,

    /// The provider refused the credentials or the request.
    #[error("Request rejected with HTTP {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// The provider could not be reached.
    #[error("Authentication service unreachable: {reason}")]
    Network {
        /// Transport error details.
        reason: String,
    },

    /// The provider answered with an unexpected body.
    #[error("Unexpected authentication response: {reason}")]
    Parse {
        /// Decoder error details.
        reason: String,
    },
}

/// Failures writing the CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
