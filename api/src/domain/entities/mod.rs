//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod note;
pub mod session;
pub mod user;

pub use note::{NewNote, Note, NoteChanges, NoteId, SLUG_MAX_LENGTH, TITLE_MAX_LENGTH};
pub use session::{NewSession, Session};
pub use user::{NewUser, User, UserId, USERNAME_MAX_LENGTH};
