//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    NewNote, NewSession, NewUser, Note, NoteChanges, NoteId, Session, User, UserId,
};
use crate::domain::ports::{NoteRepository, SessionRepository, UserRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.username == new_user.username) {
            return Err(DomainError::AlreadyExists(new_user.username.clone()));
        }

        let user = User {
            id: UserId::new(),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

// ============================================================================
// In-Memory Session Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a session, keeping its `created_at`
    pub fn with_session(self, session: Session) -> Self {
        self.sessions
            .write()
            .unwrap()
            .insert(session.token_hash.clone(), session);
        self
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, new_session: &NewSession) -> Result<Session, DomainError> {
        let session = Session {
            token_hash: new_session.token_hash.clone(),
            user_id: new_session.user_id,
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .unwrap()
            .insert(session.token_hash.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().unwrap().get(hash).cloned())
    }

    async fn delete(&self, hash: &str) -> Result<(), DomainError> {
        self.sessions.write().unwrap().remove(hash);
        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.created_at >= cutoff);
        Ok((before - sessions.len()) as u64)
    }
}

// ============================================================================
// In-Memory Note Repository
// ============================================================================

/// Enforces slug uniqueness like the SQL unique index does
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Arc<RwLock<HashMap<NoteId, Note>>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a note for testing
    pub fn with_note(self, note: Note) -> Self {
        self.notes.write().unwrap().insert(note.id, note);
        self
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError> {
        let notes = self.notes.read().unwrap();
        Ok(notes.values().find(|n| n.slug == slug).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, DomainError> {
        let notes = self.notes.read().unwrap();
        let mut owned: Vec<_> = notes
            .values()
            .filter(|n| n.author_id == *author)
            .cloned()
            .collect();
        owned.sort_by_key(|n| n.created_at);
        Ok(owned)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.notes.read().unwrap().len() as u64)
    }

    async fn create(&self, new_note: &NewNote) -> Result<Note, DomainError> {
        let mut notes = self.notes.write().unwrap();
        if notes.values().any(|n| n.slug == new_note.slug) {
            return Err(DomainError::SlugConflict(new_note.slug.clone()));
        }

        let note = Note {
            id: NoteId::new(),
            title: new_note.title.clone(),
            text: new_note.text.clone(),
            slug: new_note.slug.clone(),
            author_id: new_note.author_id,
            created_at: Utc::now(),
        };
        notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, id: &NoteId, changes: &NoteChanges) -> Result<Note, DomainError> {
        let mut notes = self.notes.write().unwrap();
        if notes
            .values()
            .any(|n| n.slug == changes.slug && n.id != *id)
        {
            return Err(DomainError::SlugConflict(changes.slug.clone()));
        }

        let note = notes
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Note {} not found", id)))?;
        note.title = changes.title.clone();
        note.text = changes.text.clone();
        note.slug = changes.slug.clone();
        Ok(note.clone())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), DomainError> {
        self.notes
            .write()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("Note {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_note, test_user};

    #[tokio::test]
    async fn in_memory_note_repo_rejects_duplicate_slug() {
        let author = test_user();
        let repo = InMemoryNoteRepository::new().with_note(test_note(&author, "slug1"));

        let result = repo
            .create(&NewNote {
                title: "t".to_string(),
                text: "t".to_string(),
                slug: "slug1".to_string(),
                author_id: author.id,
            })
            .await;

        assert!(matches!(result, Err(DomainError::SlugConflict(_))));
    }

    #[tokio::test]
    async fn in_memory_user_repo_finds_by_username() {
        let user = test_user();
        let repo = InMemoryUserRepository::new().with_user(user.clone());

        let found = repo.find_by_username("author").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);
    }
}
