//! Harness error type.

use reqwest::{Method, StatusCode};
use thiserror::Error;

use campus_coffee_api::services::PosError;

/// Errors raised while starting the test environment or talking to the
/// service under test.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The database container could not be started or inspected.
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    /// The database could not be reached.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migrations failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The service could not be bound to a local port.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTTP request failed before a response was received, or the
    /// response body could not be decoded.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request URL could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The service answered with an unexpected status.
    #[error("{method} {url} returned {status}, expected {expected}: {body}")]
    UnexpectedStatus {
        method: Method,
        url: String,
        status: StatusCode,
        expected: StatusCode,
        body: String,
    },

    /// An update was requested for a record without an identifier.
    #[error("POS '{0}' has no id")]
    MissingId(String),

    /// The in-process reset failed.
    #[error("reset failed: {0}")]
    Reset(#[from] PosError),
}

/// Result type alias for `HarnessError`.
pub type Result<T> = std::result::Result<T, HarnessError>;
