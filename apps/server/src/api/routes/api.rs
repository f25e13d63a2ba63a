//! `/api` routes.
//!
//! Public routes and protected routes are built as separate routers so the
//! auth layer only wraps the latter. Path ids are taken as strings; ids that
//! are not UUIDs resolve to 404 in the services.

use crate::api::handlers::{hotels, my_bookings, my_hotels, session, users};
use crate::state::AppState;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

pub fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/users/register", post(users::register))
        .route("/auth/login", post(session::login))
        .route("/auth/logout", post(session::logout))
        // Exact route before the `:id` capture
        .route("/hotels/search", get(hotels::search_hotels))
        .route("/hotels/:id", get(hotels::hotel_detail));

    let protected = Router::new()
        .route("/auth/validate-token", get(session::validate_token))
        .route(
            "/my-hotels",
            get(my_hotels::list_my_hotels).post(my_hotels::create_hotel),
        )
        .route(
            "/my-hotels/:id",
            get(my_hotels::get_my_hotel).put(my_hotels::update_my_hotel),
        )
        .route("/my-bookings", get(my_bookings::my_bookings))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            crate::auth::auth_middleware,
        ));

    // Unknown `/api` paths stay JSON 404s even when a frontend is served
    public.merge(protected).fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}
