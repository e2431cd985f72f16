//! SQL adapters
//!
//! Implementations of repository traits using SeaORM. The same code runs
//! against PostgreSQL and SQLite; the backend is picked by `DATABASE_URL`.

pub mod note_repo;
pub mod session_repo;
pub mod user_repo;

#[cfg(test)]
mod integration_tests;

pub use note_repo::SqlNoteRepository;
pub use session_repo::SqlSessionRepository;
pub use user_repo::SqlUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

/// Whether a write failed on a unique constraint
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) fn db_error(err: DbErr) -> DomainError {
    DomainError::Database(err.to_string())
}
