//! JSON error responses.
//!
//! Validation and not-found errors carry their message to the caller. Storage and internal
//! failures are logged in full and answered with a generic message.

use crate::errors::{Error, ErrorKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    kind: &'static str,
    message: String,
}

const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let message = match kind {
            ErrorKind::Validation | ErrorKind::NotFound => self.to_string(),
            ErrorKind::StorageUnavailable => {
                error!(error = %self, "Storage failure while handling request");
                "Storage is unavailable".to_string()
            }
            ErrorKind::Internal => {
                error!(error = %self, "Internal error while handling request");
                "Internal server error".to_string()
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                kind: kind.as_str(),
                message,
            },
        };
        (status_for(kind), Json(body)).into_response()
    }
}
