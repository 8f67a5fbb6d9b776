//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sends none
//! - Carry router-extracted path parameters and the buffered body to handlers
//! - Percent-decode the request path before routing
//! - Enforce the JSON content type on bodies and decode them
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body size limit enforced while buffering, before decoding
//! - Decoding errors surface as 400 with the decoder's message

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method, Request};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::routing::PathParams;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Percent-decode a raw URI path. Routing and the admin gate both see this form.
pub fn decode_path(raw: &str) -> ApiResult<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|path| path.into_owned())
        .map_err(|_| ApiError::BadRequest(format!("invalid path encoding: {raw}")))
}

/// Makes a fresh UUID v4 for every request lacking an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

/// Layer that stamps `x-request-id` on incoming requests.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuidV4> {
    SetRequestIdLayer::x_request_id(MakeRequestUuidV4)
}

/// Layer that copies `x-request-id` from the request onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// The request ID header value, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// A routed request as seen by a handler.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub method: Method,
    pub path: String,
    pub params: PathParams,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RouteRequest {
    /// Path parameter at `index`, or an empty string if the route captured fewer.
    pub fn param(&self, index: usize) -> &str {
        self.params.get(index).unwrap_or_default()
    }

    /// Reject requests whose media type is not `application/json`.
    pub fn require_json(&self) -> ApiResult<()> {
        let content_type = self
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if is_json(content_type) {
            Ok(())
        } else {
            Err(ApiError::UnsupportedMediaType(content_type.to_string()))
        }
    }

    /// Check the content type, then decode the body.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.require_json()?;
        Ok(serde_json::from_slice(&self.body)?)
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
