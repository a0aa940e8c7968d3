//! Mapping of domain failures onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error, warn};

use super::common::ApiResponse;
use crate::domain::DomainError;

/// Handler error wrapping a [`DomainError`].
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::MissingField(_)
            | DomainError::PasswordMismatch
            | DomainError::InvalidRole(_)
            | DomainError::AddressNotFound { .. } => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::AddressUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            DomainError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            other if other.is_client_error() => {
                debug!(status = status.as_u16(), error = %other, "Request rejected");
                other.to_string()
            }
            other => {
                warn!(status = status.as_u16(), error = %other, "Request failed");
                other.to_string()
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
