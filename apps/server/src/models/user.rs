use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// A registered account. The password is only ever held as a bcrypt hash.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// A user row ready to be stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "First Name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last Name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password with 6 or more characters required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password with 6 or more characters required"))]
    pub password: String,
}
