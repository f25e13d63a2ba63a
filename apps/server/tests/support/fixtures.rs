use super::{assert_status, json_body, register_json, session_cookie, TestApp};
use anyhow::Context as _;
use axum::http::{Method, StatusCode};
use staybook::{db::HotelStore as _, models::Hotel};
use uuid::Uuid;

/// A registered account and its session cookie.
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub cookie: String,
}

/// Register through the API and resolve the new user's id.
pub async fn register_user(app: &TestApp, email: &str) -> anyhow::Result<TestUser> {
    let (status, headers, _body) = app
        .request_json(Method::POST, "/api/users/register", &register_json(email), None)
        .await?;
    assert_status(status, StatusCode::OK, "register");
    let cookie = session_cookie(&headers)?;

    let (status, _headers, body) = app
        .request(Method::GET, "/api/auth/validate-token", None, Some(&cookie))
        .await?;
    assert_status(status, StatusCode::OK, "validate fresh session");
    let id = json_body(&body)?["userId"]
        .as_str()
        .context("userId is a string")?
        .parse()
        .context("userId is a UUID")?;

    Ok(TestUser {
        id,
        email: email.to_string(),
        cookie,
    })
}

/// Insert hotels straight into the store, bypassing the API.
pub async fn seed_hotels(app: &TestApp, hotels: Vec<Hotel>) -> anyhow::Result<()> {
    for hotel in hotels {
        app.state.hotels.insert(hotel).await?;
    }
    Ok(())
}
