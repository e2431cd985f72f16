//! Auth service
//!
//! Handles signup, password login, session tokens and logout.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::app::forms::{FormErrors, LoginForm, SignupForm, NON_FIELD_ERRORS};
use crate::domain::entities::{NewSession, NewUser, Session, User};
use crate::domain::ports::{SessionRepository, UserRepository};
use crate::error::{AppError, DomainError};

pub const BAD_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Service for accounts and sessions
pub struct AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    session_max_age: Duration,
}

impl<UR, SR> AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    pub fn new(users: Arc<UR>, sessions: Arc<SR>, session_max_age: Duration) -> Self {
        Self {
            users,
            sessions,
            session_max_age,
        }
    }

    /// Create an account
    pub async fn signup(&self, form: &SignupForm) -> Result<User, AppError> {
        form.validate()
            .map_err(|errors| AppError::invalid_form(form, errors))?;

        let username = form.username.trim();
        if self.users.find_by_username(username).await?.is_some() {
            return Err(username_taken(form));
        }

        let new_user = NewUser {
            username: username.to_string(),
            password_hash: hash_password(&form.password1)?,
        };

        let user = self.users.create(&new_user).await.map_err(|e| match e {
            DomainError::AlreadyExists(_) => username_taken(form),
            e => e.into(),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User signed up");
        Ok(user)
    }

    /// Check credentials and start a session.
    ///
    /// Returns the user and the raw session token (only shown once).
    pub async fn login(&self, form: &LoginForm) -> Result<(User, String), AppError> {
        form.validate()
            .map_err(|errors| AppError::invalid_form(form, errors))?;

        let user = self
            .users
            .find_by_username(form.username.trim())
            .await?
            .filter(|u| verify_password(&form.password, &u.password_hash));

        let Some(user) = user else {
            tracing::warn!(username = %form.username, "Failed login attempt");
            let mut errors = FormErrors::default();
            errors.add(NON_FIELD_ERRORS, BAD_CREDENTIALS);
            return Err(AppError::invalid_form(form, errors));
        };

        let token = self.force_login(&user).await?;
        Ok((user, token))
    }

    /// Start a session for `user` without checking a password.
    ///
    /// Sessions past their max age are purged on the way.
    pub async fn force_login(&self, user: &User) -> Result<String, AppError> {
        let token = generate_session_token();
        self.sessions
            .create(&NewSession {
                token_hash: hash_session_token(&token),
                user_id: user.id,
            })
            .await?;

        let purged = self
            .sessions
            .delete_created_before(Utc::now() - self.session_max_age)
            .await?;
        if purged > 0 {
            tracing::debug!(count = purged, "Purged expired sessions");
        }

        tracing::debug!(user_id = %user.id, "Session started");
        Ok(token)
    }

    /// The user behind a raw session token, if the session exists and has
    /// not expired. An expired session is deleted.
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, AppError> {
        let Some(session) = self
            .sessions
            .find_by_token_hash(&hash_session_token(token))
            .await?
        else {
            return Ok(None);
        };

        if self.is_expired(&session) {
            self.sessions.delete(&session.token_hash).await?;
            tracing::debug!(user_id = %session.user_id, "Session expired");
            return Ok(None);
        }

        Ok(self.users.find_by_id(&session.user_id).await?)
    }

    fn is_expired(&self, session: &Session) -> bool {
        Utc::now() - session.created_at >= self.session_max_age
    }

    /// End the session behind `token`
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions.delete(&hash_session_token(token)).await?;
        Ok(())
    }
}

fn username_taken(form: &SignupForm) -> AppError {
    let mut errors = FormErrors::default();
    errors.add("username", USERNAME_TAKEN);
    AppError::invalid_form(form, errors)
}

/// Generate a random session token
fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    hex::encode(bytes)
}

/// Hash a session token for storage
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Argon2id hash in PHC string format, with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string. Unparseable values never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}
