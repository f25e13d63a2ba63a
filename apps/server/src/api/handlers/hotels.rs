//! Public hotel endpoints: search and detail.

use crate::{state::AppState, Result};
use axum::{
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Response},
    Json,
};

/// GET /api/hotels/search?params
///
/// Repeated keys (`facilities`, `types`, `stars`) are kept in order, so the
/// query string is decoded into pairs rather than a map.
pub async fn search_hotels(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    let items: Vec<(String, String)> = query
        .as_deref()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let page = state.search_service.search(&items).await?;
    Ok(Json(page).into_response())
}

/// GET /api/hotels/:id
pub async fn hotel_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let hotel = state.hotel_service.public_detail(&id).await?;
    Ok(Json(hotel).into_response())
}
