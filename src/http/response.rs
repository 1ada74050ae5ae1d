//! Response normalisation.
//!
//! Middleware layers below the router answer some requests themselves:
//! `TimeoutLayer` with an empty 408, `RequestBodyLimitLayer` with a plain-text
//! 413. Those bodies are rewritten into the usual `{"error": ...}` shape.

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ErrorBody;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Give layer-generated 408 and 413 responses a JSON error body.
pub async fn json_error_bodies(request: Request<Body>, next: Next) -> Response {
    let response = next.run(request).await;
    let message = match response.status() {
        StatusCode::REQUEST_TIMEOUT => "request timed out",
        StatusCode::PAYLOAD_TOO_LARGE => "request body too large",
        _ => return response,
    };
    if is_json(response.headers()) {
        return response;
    }

    (
        response.status(),
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}
