//! Custom Axum extractors.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// JSON request body whose rejections use the API's `{"message": ...}` shape.
///
/// Unlike `axum::Json`, a missing or foreign content type is not rejected;
/// the body is parsed as JSON regardless.
pub struct JsonBody<T>(pub T);

/// Error type for [`JsonBody`] extraction failures.
#[derive(Debug)]
pub struct JsonBodyRejection {
    message: String,
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.message });
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonBodyRejection {
                message: format!("Failed to read request body: {}", e),
            })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| JsonBodyRejection {
                message: format!("Invalid JSON in request body: {}", e),
            })
    }
}
