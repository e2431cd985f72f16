//! Note domain entity
//!
//! A short text note owned by exactly one user and addressed by its slug.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

pub const TITLE_MAX_LENGTH: usize = 100;
pub const SLUG_MAX_LENGTH: usize = 100;

/// Unique identifier for a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NoteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored note
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    pub slug: String,
    /// Set once at creation; no update path touches it.
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new note
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: UserId,
}

/// Editable fields of a note. There is no author field here.
#[derive(Debug, Clone)]
pub struct NoteChanges {
    pub title: String,
    pub text: String,
    pub slug: String,
}
