//! Account registration and login.

use crate::{
    auth::{hash_password, verify_password, AuthManager},
    db::UserStore,
    models::{LoginRequest, NewUser, RegisterRequest, User},
    Error, Result,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// A freshly authenticated user and the session token issued for them.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

pub struct UserService {
    users: Arc<dyn UserStore>,
    auth: Arc<AuthManager>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, auth: Arc<AuthManager>) -> Self {
        Self { users, auth }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<Session> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(Error::UserExists);
        }

        let password = request.password;
        let password_hash = run_blocking(move || hash_password(&password)).await?;
        let user = self
            .users
            .insert(NewUser {
                email: request.email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        self.session_for(user)
    }

    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<Session> {
        request.validate()?;

        let Some(user) = self.users.find_by_email(&request.email).await? else {
            return Err(Error::InvalidCredentials);
        };
        let password = request.password;
        let hash = user.password_hash.clone();
        if !run_blocking(move || verify_password(&password, &hash)).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(Error::InvalidCredentials);
        }

        self.session_for(user)
    }

    /// The account behind a verified session token.
    ///
    /// # Errors
    /// * `Unauthorized` - the account no longer exists
    pub async fn current_user(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(Error::Unauthorized)
    }

    fn session_for(&self, user: User) -> Result<Session> {
        let token = self.auth.issue_token(user.id)?;
        Ok(Session { user, token })
    }
}

/// bcrypt is CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {e}")))?
}
