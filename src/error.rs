//! API error types.

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::response::message;
use crate::store::StoreError;

/// Errors surfaced to HTTP clients as `{"message": ...}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("405 method not allowed")]
    MethodNotAllowed { allowed: Vec<Method> },

    #[error("need content-type 'application/json', but was '{0}'")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Customer lookups on `/customers/{id}` report absence as 404.
    pub fn customer_lookup(err: StoreError) -> Self {
        match err {
            StoreError::CustomerNotFound(_) => Self::NotFound("customer not found".into()),
            StoreError::OrderNotFound { .. } => Self::NotFound("order not found".into()),
        }
    }

    /// Order routes report a missing owning customer as 409.
    pub fn order_lookup(err: StoreError) -> Self {
        match err {
            StoreError::CustomerNotFound(_) => Self::Conflict("customer not found".into()),
            StoreError::OrderNotFound { .. } => Self::NotFound("order not found".into()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = message(status, self.to_string());

        match &self {
            Self::MethodNotAllowed { allowed } => {
                let allow = allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                if let Ok(value) = HeaderValue::from_str(&allow) {
                    response.headers_mut().insert(header::ALLOW, value);
                }
            }
            Self::Unauthorized(_) => {
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Basic realm=\"admin\""),
                );
            }
            _ => {}
        }

        response
    }
}

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_customer_maps_by_context() {
        let err = StoreError::CustomerNotFound("42".into());

        assert_eq!(ApiError::customer_lookup(err.clone()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::order_lookup(err).status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_order_is_not_found() {
        let err = StoreError::OrderNotFound {
            customer_id: "42".into(),
            order_id: "7".into(),
        };
        let api = ApiError::order_lookup(err);

        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(api.to_string(), "order not found");
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = ApiError::MethodNotAllowed {
            allowed: vec![Method::GET, Method::POST],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");
    }

    #[test]
    fn test_unauthorized_challenges_for_basic() {
        let response = ApiError::Unauthorized("basic authentication is required".into()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Basic realm=\"admin\"");
    }
}
