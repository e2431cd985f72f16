//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod slugify;
pub mod sql;

pub use slugify::TransliteratingSlugifier;
pub use sql::{SqlNoteRepository, SqlSessionRepository, SqlUserRepository};
