//! Request ID middleware
//!
//! Opens the root span for each HTTP request. The span carries the request
//! id, and `auth_middleware` fills in `user_id` on protected routes.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Span;
use uuid::Uuid;

/// Header carrying the server-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Server assigns `x-request-id` on every response. A differing client id is
/// echoed back in `x-correlation-id`.
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %req.uri().path(),
        http.response.status_code = tracing::field::Empty,
        request_id = tracing::field::Empty,
        user_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let current_span = Span::current();
    let start = Instant::now();

    let client_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let server_id = Uuid::new_v4().to_string();
    current_span.record("request_id", server_id.as_str());

    let path = req.uri().path().to_string();
    let method = req.method().clone();

    tracing::debug!(method = %method, path = %path, "Incoming request");

    let mut response = next.run(req).await;

    let status = response.status();
    current_span.record("http.response.status_code", status.as_u16());

    tracing::info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&server_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    if let Some(client_id) = client_id {
        if client_id != server_id {
            if let Ok(value) = HeaderValue::from_str(&client_id) {
                headers.insert("x-correlation-id", value);
            }
        }
    }

    response
}
