//! Login, logout and token validation.

use crate::{
    api::extractors::JsonBody, auth::AuthenticatedPrincipal, models::LoginRequest,
    state::AppState, Result,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Response> {
    let session = state.user_service.login(request).await?;
    let cookie = state.auth.session_cookie(&session.token)?;
    tracing::info!(user_id = %session.user.id, "User logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "userId": session.user.id })),
    )
        .into_response())
}

/// GET /api/auth/validate-token
///
/// A correctly signed token for an account that no longer exists is rejected.
pub async fn validate_token(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Response> {
    let user = state.user_service.current_user(principal.user_id).await?;
    Ok((StatusCode::OK, Json(json!({ "userId": user.id }))).into_response())
}

/// POST /api/auth/logout
///
/// Always succeeds, with or without a current session.
pub async fn logout(State(state): State<AppState>) -> Result<Response> {
    let cookie = state.auth.clear_cookie()?;
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]).into_response())
}
