//! Error replies for the API handlers.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use matreshka_shared::ErrorBody;

use crate::access::AccessDenied;

/// A failed request, rendered as `{"detail": ...}` with its status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    status: StatusCode,
    detail: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, detail)
    }

    pub fn user_not_found() -> Self {
        Self::not_found("User not found")
    }

    /// Storage failure; logged here so handlers can just `map_err`.
    pub fn storage(e: impl fmt::Display) -> Self {
        tracing::error!("Database error: {}", e);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", e))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<AccessDenied> for ApiFailure {
    fn from(denied: AccessDenied) -> Self {
        Self::forbidden(denied.detail())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.detail))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_denial_maps_to_forbidden() {
        let failure = ApiFailure::from(AccessDenied::RestrictedCountry);
        assert_eq!(failure.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            failure.detail(),
            "Premium subscription required for this country"
        );
    }

    #[test]
    fn storage_errors_are_internal() {
        let failure = ApiFailure::storage("disk full");
        assert_eq!(failure.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failure.detail(), "Database error: disk full");
    }

    #[test]
    fn renders_status_code() {
        let response = ApiFailure::user_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
