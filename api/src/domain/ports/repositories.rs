//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (SeaORM over PostgreSQL or SQLite).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    NewNote, NewSession, NewUser, Note, NoteChanges, NoteId, Session, User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user. Fails with `AlreadyExists` if the username is taken.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Repository for login sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session
    async fn create(&self, session: &NewSession) -> Result<Session, DomainError>;

    /// Find a session by the hash of its token
    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError>;

    /// Remove a session. Removing an unknown session is not an error.
    async fn delete(&self, hash: &str) -> Result<(), DomainError>;

    /// Remove every session started before `cutoff`, returning how many
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}

/// Repository for Note entities
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Find a note by slug, regardless of author
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError>;

    /// All notes written by `author`, oldest first
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, DomainError>;

    /// Total number of notes
    async fn count(&self) -> Result<u64, DomainError>;

    /// Create a note. A taken slug fails with `SlugConflict`.
    async fn create(&self, note: &NewNote) -> Result<Note, DomainError>;

    /// Overwrite the editable fields. A taken slug fails with `SlugConflict`.
    async fn update(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note, DomainError>;

    /// Delete a note
    async fn delete(&self, id: &NoteId) -> Result<(), DomainError>;
}
