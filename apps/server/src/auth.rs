//! Authentication primitives.
//!
//! Sessions are stateless: a successful login or registration issues an HS256
//! token carrying the user id, delivered in an `HttpOnly` cookie. Protected
//! routes validate that cookie through [`auth_middleware`].

use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{config::AuthConfig, state::AppState, Result};

/// bcrypt work factor for stored password hashes.
pub const PASSWORD_HASH_COST: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
}

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub enum AuthError {
    MissingToken,
    InvalidToken(String),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn diagnostics(&self) -> String {
        match self {
            Self::MissingToken => "Missing session cookie".to_string(),
            Self::InvalidToken(msg) => format!("Invalid session token: {msg}"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self.diagnostics(), "Rejected unauthenticated request");
        (self.status(), axum::Json(json!({ "message": "unauthorized" }))).into_response()
    }
}

#[derive(Clone)]
pub struct AuthManager {
    cookie_name: String,
    token_ttl_seconds: i64,
    secure_cookie: bool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            cookie_name: config.cookie_name.clone(),
            token_ttl_seconds: config.token_ttl_seconds,
            secure_cookie: config.secure_cookie,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Sign a session token for `user_id`, valid for the configured lifetime.
    pub fn issue_token(&self, user_id: Uuid) -> Result<String> {
        let claims = Claims {
            user_id,
            exp: Utc::now().timestamp() + self.token_ttl_seconds,
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    pub fn verify_token(&self, token: &str) -> std::result::Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(Principal {
            user_id: data.claims.user_id,
        })
    }

    /// `Set-Cookie` value delivering a session token.
    pub fn session_cookie(&self, token: &str) -> Result<HeaderValue> {
        let mut cookie = format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
            self.cookie_name, token, self.token_ttl_seconds
        );
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
            .map_err(|e| crate::Error::Internal(format!("Invalid session cookie: {e}")))
    }

    /// `Set-Cookie` value that expires the session cookie.
    pub fn clear_cookie(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{}=; HttpOnly; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.cookie_name
        ))
        .map_err(|e| crate::Error::Internal(format!("Invalid session cookie: {e}")))
    }

    /// The session token from the request's `Cookie` headers, if any.
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn authenticate_headers(
        &self,
        headers: &HeaderMap,
    ) -> std::result::Result<Principal, AuthError> {
        let token = self
            .token_from_headers(headers)
            .ok_or(AuthError::MissingToken)?;
        self.verify_token(&token)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, PASSWORD_HASH_COST)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Extractor for the authenticated principal attached by middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedPrincipal(pub Principal);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .map(AuthenticatedPrincipal)
            .ok_or_else(|| AuthError::MissingToken.into_response())
    }
}

/// Middleware for attaching `Principal` (or rejecting) on protected routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    if req.method() == axum::http::Method::OPTIONS {
        return next.run(req).await;
    }

    match state.auth.authenticate_headers(req.headers()) {
        Ok(principal) => {
            tracing::Span::current().record("user_id", tracing::field::display(principal.user_id));
            req.extensions_mut().insert::<Principal>(principal);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
