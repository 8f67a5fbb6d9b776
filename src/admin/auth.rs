use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::config::AdminConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::request::{decode_path, request_id};
use crate::http::server::AppState;

/// Gate every `/admin` path behind HTTP Basic credentials. Other paths pass through.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Undecodable paths fall through; dispatch rejects them with 400.
    match decode_path(request.uri().path()) {
        Ok(path) if is_admin_path(&path) => {}
        _ => return next.run(request).await,
    }

    match authorize(&state.config.admin, request.headers()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id(request.headers()),
                path = %request.uri().path(),
                reason = %e,
                "Admin request rejected"
            );
            e.into_response()
        }
    }
}

pub fn is_admin_path(path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/")
}

/// Check the `Authorization` header against the configured admin account.
pub fn authorize(config: &AdminConfig, headers: &HeaderMap) -> ApiResult<()> {
    let (username, password) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_basic)
        .ok_or_else(|| ApiError::Unauthorized("basic authentication is required".into()))?;

    // An unconfigured account never authenticates.
    let configured = !config.username.is_empty();
    let user_ok = constant_time_compare(&username, &config.username);
    let pass_ok = constant_time_compare(&password, &config.password);

    if configured && user_ok && pass_ok {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("username or password is invalid".into()))
    }
}

/// Decode `Basic <base64(user:pass)>`.
pub fn parse_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
