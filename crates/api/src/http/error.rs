//! Mapping of domain errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sectorgrid_domain::SectorGridError;
use serde::Serialize;

/// Domain error carried out of a handler.
#[derive(Debug)]
pub struct ApiError(pub SectorGridError);

impl From<SectorGridError> for ApiError {
    fn from(value: SectorGridError) -> Self {
        ApiError(value)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a SectorGridError,
    message: String,
}

/// Status code for a domain error.
pub fn status_for(error: &SectorGridError) -> StatusCode {
    match error {
        SectorGridError::Schema { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SectorGridError::NotFound(_) => StatusCode::NOT_FOUND,
        SectorGridError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        SectorGridError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
        SectorGridError::Config(_) | SectorGridError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: &self.0, message: self.0.user_message() };
        (status_for(&self.0), Json(body)).into_response()
    }
}
