//! Owner-side hotel management. Every route here sits behind `auth_middleware`.

use crate::{
    api::extractors::JsonBody, auth::AuthenticatedPrincipal, models::HotelDraft,
    state::AppState, Result,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// POST /api/my-hotels
pub async fn create_hotel(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    JsonBody(draft): JsonBody<HotelDraft>,
) -> Result<Response> {
    let hotel = state
        .hotel_service
        .create(principal.user_id, draft)
        .await?;
    Ok((StatusCode::CREATED, Json(hotel)).into_response())
}

/// GET /api/my-hotels
pub async fn list_my_hotels(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Response> {
    let hotels = state.hotel_service.list_owned(principal.user_id).await?;
    Ok(Json(hotels).into_response())
}

/// GET /api/my-hotels/:id
pub async fn get_my_hotel(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
) -> Result<Response> {
    let hotel = state
        .hotel_service
        .get_owned(principal.user_id, &id)
        .await?;
    Ok(Json(hotel).into_response())
}

/// PUT /api/my-hotels/:id
///
/// Responds 201 on success, matching what existing clients expect.
pub async fn update_my_hotel(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<HotelDraft>,
) -> Result<Response> {
    let hotel = state
        .hotel_service
        .update_owned(principal.user_id, &id, draft)
        .await?;
    Ok((StatusCode::CREATED, Json(hotel)).into_response())
}
