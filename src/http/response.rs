//! Mapping governance outcomes onto HTTP responses.
//!
//! Everything a caller sees is wrapped in an `{"error": ...}` envelope.
//! Validation failures carry the field → message map verbatim; store faults
//! carry only an opaque message (the cause was already logged at the fault
//! site).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::GovernanceError;

const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

impl IntoResponse for GovernanceError {
    fn into_response(self) -> Response {
        match self {
            GovernanceError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": errors })),
            )
                .into_response(),
            GovernanceError::NotFound => {
                error_response(StatusCode::NOT_FOUND, &self.to_string())
            }
            GovernanceError::EditConflict => {
                error_response(StatusCode::CONFLICT, &self.to_string())
            }
            GovernanceError::RateLimited => {
                error_response(StatusCode::TOO_MANY_REQUESTS, &self.to_string())
            }
            GovernanceError::StoreTimeout(_) | GovernanceError::Store(_) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
