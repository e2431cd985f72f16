//! Login session entity

use chrono::{DateTime, Utc};

use super::UserId;

/// A logged-in session. Only the hash of the client token is kept.
#[derive(Debug, Clone)]
pub struct Session {
    pub token_hash: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub token_hash: String,
    pub user_id: UserId,
}
