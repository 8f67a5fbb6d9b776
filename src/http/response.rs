//! Response construction.
//!
//! Every body is JSON: either a serialized entity or `{"message": "..."}`.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Serialize)]
struct Message<'a> {
    message: &'a str,
}

/// Build a response from raw JSON bytes.
pub fn json_bytes(status: StatusCode, body: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    response
}

/// `{"message": text}` with the given status.
pub fn message(status: StatusCode, text: impl AsRef<str>) -> Response {
    match serde_json::to_vec(&Message { message: text.as_ref() }) {
        Ok(body) => json_bytes(status, body),
        Err(_) => json_bytes(StatusCode::INTERNAL_SERVER_ERROR, Vec::new()),
    }
}

/// Serialize `value` with the given status.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => json_bytes(status, body),
        Err(e) => ApiError::Internal(format!("failed to encode response: {e}")).into_response(),
    }
}

/// 201 Created with a `Location` header pointing at the new entity.
pub fn created<T: Serialize>(request_path: &str, id: &str, value: &T) -> Response {
    let mut response = json(StatusCode::CREATED, value);
    if let Ok(location) = HeaderValue::from_str(&location(request_path, id)) {
        response.headers_mut().insert(header::LOCATION, location);
    }
    response
}

/// Join the collection path and the new id without doubling the slash.
pub fn location(request_path: &str, id: &str) -> String {
    if request_path.ends_with('/') {
        format!("{request_path}{id}")
    } else {
        format!("{request_path}/{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_location_joining() {
        assert_eq!(location("/customers", "17"), "/customers/17");
        assert_eq!(location("/customers/", "17"), "/customers/17");
        assert_eq!(location("/customers/4/orders", "9"), "/customers/4/orders/9");
    }

    #[tokio::test]
    async fn test_message_body() {
        let response = message(StatusCode::NOT_FOUND, "customer not found");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"message": "customer not found"})
        );
    }

    #[tokio::test]
    async fn test_message_escapes_quotes() {
        let response = message(StatusCode::BAD_REQUEST, "expected `\"` here");
        assert_eq!(
            body_json(response).await["message"],
            "expected `\"` here"
        );
    }

    #[tokio::test]
    async fn test_unencodable_entity_is_500() {
        // JSON object keys must be strings.
        let entity = std::collections::HashMap::from([((1, 2), 3)]);
        let response = json(StatusCode::OK, &entity);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("failed to encode response"));
    }

    #[test]
    fn test_created_sets_location() {
        let response = created("/customers/", "abc", &serde_json::json!({"id": "abc"}));

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/customers/abc");
    }
}
