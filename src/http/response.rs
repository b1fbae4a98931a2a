//! Response payloads.
//!
//! # Responsibilities
//! - Encode successful queries as a bare JSON array of group names
//! - Encode failures as `{result, status, error: {kind, message}}`
//!
//! # Design Decisions
//! - The HTTP status of error payloads is configurable; the payload is the
//!   authoritative signal of failure

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{ConfigurationError, ErrorKind};

/// Machine-readable error description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// Error payload returned in place of a result list.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    status_code: StatusCode,
    pub result: Option<Vec<String>>,
    pub status: &'static str,
    pub error: ErrorBody,
}

impl ErrorResponse {
    /// Build an error payload sent with `status_code`.
    pub fn new(error: &ConfigurationError, status_code: StatusCode) -> Self {
        Self {
            status_code,
            result: None,
            status: "Error",
            error: ErrorBody {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
