//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::issue::services::{IssueErrorKind, IssueTrackerError};

/// Body returned with every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// HTTP status code repeated in the body.
    pub code: u16,
}

/// Failed request: status code plus message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status code.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a `400 Bad Request` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

const fn status_for(kind: IssueErrorKind) -> StatusCode {
    match kind {
        IssueErrorKind::IssueNotFound => StatusCode::NOT_FOUND,
        IssueErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        IssueErrorKind::TitleRequired
        | IssueErrorKind::UnknownUser
        | IssueErrorKind::InvalidStatus
        | IssueErrorKind::AssigneeRequiredForStatus
        | IssueErrorKind::IssueTerminal => StatusCode::BAD_REQUEST,
    }
}

impl From<IssueTrackerError> for ApiError {
    fn from(err: IssueTrackerError) -> Self {
        let status = status_for(err.kind());
        if status.is_server_error() {
            error!(error = %err, "issue tracker storage failure");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}
