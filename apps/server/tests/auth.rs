#[allow(unused)]
mod support;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use support::*;

#[tokio::test]
async fn register_sets_session_cookie() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, headers, body) = app
                .request_json(
                    Method::POST,
                    "/api/users/register",
                    &register_json("ada@example.com"),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::OK, "register");
            assert_eq!(
                json_body(&body)?,
                json!({ "message": "User registered OK", "success": true })
            );

            let raw = headers
                .get(header::SET_COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            assert!(raw.starts_with("auth_token="));
            assert!(raw.contains("HttpOnly"));
            assert!(raw.contains("Max-Age=86400"));
            assert!(!raw.contains("Secure"));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            register_user(app, "dup@example.com").await?;

            let (status, _headers, body) = app
                .request_json(
                    Method::POST,
                    "/api/users/register",
                    &register_json("dup@example.com"),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "duplicate register");
            assert_eq!(error_message(&body)?, "User already exists");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_registration_lists_failures() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request_json(
                    Method::POST,
                    "/api/users/register",
                    &json!({
                        "firstName": "",
                        "lastName": "User",
                        "email": "not-an-email",
                        "password": "short"
                    }),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "invalid register");
            let message = error_message(&body)?;
            assert!(message.contains("First Name is required"));
            assert!(message.contains("Email is required"));
            assert!(message.contains("6 or more characters"));
            assert!(!message.contains("Last Name"));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, body) = app
                .request(
                    Method::POST,
                    "/api/auth/login",
                    Some(axum::body::Bytes::from_static(b"{not json")),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "malformed body");
            assert!(error_message(&body)?.starts_with("Invalid JSON"));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn login_round_trip() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let user = register_user(app, "grace@example.com").await?;

            let (status, headers, body) = app
                .request_json(
                    Method::POST,
                    "/api/auth/login",
                    &json!({ "email": "grace@example.com", "password": "password123" }),
                    None,
                )
                .await?;
            assert_status(status, StatusCode::OK, "login");
            assert_eq!(json_body(&body)?["userId"], user.id.to_string());

            let cookie = session_cookie(&headers)?;
            let (status, _headers, body) = app
                .request(Method::GET, "/api/auth/validate-token", None, Some(&cookie))
                .await?;
            assert_status(status, StatusCode::OK, "validate-token");
            assert_eq!(json_body(&body)?["userId"], user.id.to_string());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn bad_credentials_look_the_same() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            register_user(app, "grace@example.com").await?;

            for credentials in [
                json!({ "email": "grace@example.com", "password": "wrong-password" }),
                json!({ "email": "nobody@example.com", "password": "password123" }),
            ] {
                let (status, headers, body) = app
                    .request_json(Method::POST, "/api/auth/login", &credentials, None)
                    .await?;
                assert_status(status, StatusCode::BAD_REQUEST, "bad login");
                assert_eq!(error_message(&body)?, "Invalid Credentials");
                assert!(headers.get(header::SET_COOKIE).is_none());
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn protected_routes_require_a_valid_cookie() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for cookie in [None, Some("auth_token=forged.token.value"), Some("other=1")] {
                let (status, _headers, body) = app
                    .request(Method::GET, "/api/auth/validate-token", None, cookie)
                    .await?;
                assert_status(status, StatusCode::UNAUTHORIZED, "validate-token");
                assert_eq!(error_message(&body)?, "unauthorized");
            }

            let (status, _headers, _body) =
                app.request(Method::GET, "/api/my-hotels", None, None).await?;
            assert_status(status, StatusCode::UNAUTHORIZED, "my-hotels");
            let (status, _headers, _body) =
                app.request(Method::GET, "/api/my-bookings", None, None).await?;
            assert_status(status, StatusCode::UNAUTHORIZED, "my-bookings");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn tokens_signed_elsewhere_are_rejected() -> anyhow::Result<()> {
    let other = TestApp::new_with_config(|config| {
        config.auth.jwt_secret = "a-different-secret".to_string();
    })
    .await?;
    let stranger = register_user(&other, "stranger@example.com").await?;

    with_test_app(|app| {
        Box::pin(async move {
            let (status, _headers, _body) = app
                .request(
                    Method::GET,
                    "/api/auth/validate-token",
                    None,
                    Some(&stranger.cookie),
                )
                .await?;
            assert_status(status, StatusCode::UNAUTHORIZED, "foreign token");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn tokens_for_unknown_accounts_are_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.state.auth.issue_token(uuid::Uuid::new_v4())?;
            let cookie = format!("auth_token={token}");
            let (status, _headers, body) = app
                .request(Method::GET, "/api/auth/validate-token", None, Some(&cookie))
                .await?;
            assert_status(status, StatusCode::UNAUTHORIZED, "unknown account");
            assert_eq!(error_message(&body)?, "unauthorized");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn logout_clears_the_cookie() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, headers, body) = app
                .request(Method::POST, "/api/auth/logout", None, None)
                .await?;
            assert_status(status, StatusCode::OK, "logout");
            assert!(body.is_empty());

            let raw = headers
                .get(header::SET_COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            assert!(raw.starts_with("auth_token=;"));
            assert!(raw.contains("Max-Age=0"));
            assert!(raw.contains("1970"));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn responses_carry_request_ids_and_security_headers() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, headers, body) = app.request(Method::GET, "/health", None, None).await?;
            assert_status(status, StatusCode::OK, "health");
            assert_eq!(json_body(&body)?["status"], "ok");
            assert!(headers.get("x-request-id").is_some());
            assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");

            let (status, _headers, body) =
                app.request(Method::GET, "/api/nowhere", None, None).await?;
            assert_status(status, StatusCode::NOT_FOUND, "unknown api path");
            assert_eq!(error_message(&body)?, "Not found");
            Ok(())
        })
    })
    .await
}
