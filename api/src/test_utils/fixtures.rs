//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{Note, NoteId, User, UserId};

/// Create a test user with a specific username
pub fn test_user_named(username: &str) -> User {
    User {
        id: UserId(Uuid::new_v4()),
        username: username.to_string(),
        password_hash: "!".to_string(),
        created_at: Utc::now(),
    }
}

/// Create a test user with default values
pub fn test_user() -> User {
    test_user_named("author")
}

/// Create a note written by `author` with the given slug
pub fn test_note(author: &User, slug: &str) -> Note {
    Note {
        id: NoteId(Uuid::new_v4()),
        title: "Заголовок".to_string(),
        text: "Текст заметки".to_string(),
        slug: slug.to_string(),
        author_id: author.id,
        created_at: Utc::now(),
    }
}
