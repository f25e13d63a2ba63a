//! Account registration.

use crate::{
    api::extractors::JsonBody, models::RegisterRequest, state::AppState, Result,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<Response> {
    let session = state.user_service.register(request).await?;
    let cookie = state.auth.session_cookie(&session.token)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "message": "User registered OK", "success": true })),
    )
        .into_response())
}
