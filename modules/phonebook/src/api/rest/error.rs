use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::rest::dto::ErrorDto;
use crate::domain::error::DomainError;

/// Wire-level error: a status plus an optional `{"error": ...}` body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Option<ErrorDto>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(ErrorDto {
                error: message.into(),
            }),
        }
    }

    /// Status only, empty body.
    pub fn bare(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Map a domain error to its HTTP response; the single place that decides statuses.
pub fn map_domain_error(e: &DomainError) -> ApiError {
    match e {
        DomainError::Validation { message } | DomainError::StoreValidation { message } => {
            ApiError::bad_request(message.clone())
        }
        DomainError::InvalidIdentifier { .. } => ApiError::bad_request("malformatted id"),
        DomainError::PersonNotFound { .. } => ApiError::bare(StatusCode::NOT_FOUND),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}
