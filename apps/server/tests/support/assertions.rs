use anyhow::Context as _;
use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}: unexpected status");
}

/// Parse a response body as JSON.
pub fn json_body(body: &Bytes) -> anyhow::Result<Value> {
    serde_json::from_slice(body).context("response body is JSON")
}

/// The `message` field of an error response.
pub fn error_message(body: &Bytes) -> anyhow::Result<String> {
    let value = json_body(body)?;
    value["message"]
        .as_str()
        .map(str::to_string)
        .context("error body has a string message")
}

/// The `name=value` pair of the first `Set-Cookie` header.
pub fn session_cookie(headers: &HeaderMap) -> anyhow::Result<String> {
    let raw = headers
        .get(header::SET_COOKIE)
        .context("response sets a cookie")?
        .to_str()
        .context("cookie header is ASCII")?;
    Ok(raw.split(';').next().unwrap_or_default().trim().to_string())
}

/// Hotel names in response order.
pub fn hotel_names(hotels: &Value) -> Vec<String> {
    hotels
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|h| h["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
