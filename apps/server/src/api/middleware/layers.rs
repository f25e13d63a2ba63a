//! Layer factories for middleware

use axum::http::{header, HeaderValue, Method};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Tracing/logging middleware
///
/// Span-per-request lives in `request_id_middleware`; this layer adds the
/// response status and latency events.
pub fn trace() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG))
}

/// CORS middleware
///
/// The session cookie must cross origins from the frontend, so credentials
/// are allowed. That rules out wildcards: methods and headers are listed.
pub fn cors(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        // Secure default: do not emit permissive CORS headers unless explicitly configured.
        return CorsLayer::new();
    }

    let header_values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // If all configured origins were invalid, fall back to no CORS.
    if header_values.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(header_values))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
}

/// Compression middleware
pub fn compression() -> CompressionLayer {
    CompressionLayer::new()
}
