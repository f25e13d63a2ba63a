use crate::{auth::AuthenticatedPrincipal, state::AppState, Result};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

/// GET /api/my-bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Response> {
    let hotels = state
        .booking_service
        .my_bookings(principal.user_id)
        .await?;
    Ok(Json(hotels).into_response())
}
