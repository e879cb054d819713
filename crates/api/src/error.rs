//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Server errors are captured to
//! Sentry before responding; client errors are answered with a JSON body of
//! the form `{"error": "<message>"}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use campus_coffee_core::PosNameError;

use crate::services::PosError;

/// Application-level error type for the POS service.
#[derive(Debug, Error)]
pub enum AppError {
    /// POS service operation failed.
    #[error("{0}")]
    Pos(#[from] PosError),

    /// The POS name failed validation.
    #[error("Invalid POS name: {0}")]
    InvalidName(#[from] PosNameError),

    /// The request body could not be parsed.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Pos(err) => match err {
                PosError::NotFound(_) | PosError::NameNotFound(_) => StatusCode::NOT_FOUND,
                PosError::DuplicateName(_) => StatusCode::CONFLICT,
                PosError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidName(_) | Self::InvalidBody(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let error = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use campus_coffee_core::PosId;

    use super::*;
    use crate::db::RepositoryError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(PosError::NotFound(PosId::new(7)));
        assert_eq!(err.to_string(), "POS with ID 7 does not exist");

        let err = AppError::BadRequest("ids differ".to_string());
        assert_eq!(err.to_string(), "Bad request: ids differ");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(PosError::NotFound(PosId::new(1)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(PosError::NameNotFound("Schmelzpunkt".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(PosError::DuplicateName("Schmelzpunkt".to_string()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(PosNameError::Blank.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::InvalidBody("missing field".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(PosError::Repository(sqlx::Error::PoolTimedOut.into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(PosError::Repository(RepositoryError::NotFound).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let err = AppError::from(PosError::Repository(RepositoryError::Database(
            sqlx::Error::Protocol("connection refused on 10.0.0.3".to_string()),
        )));
        assert!(err.to_string().contains("10.0.0.3"));

        let response = err.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
    }
}
