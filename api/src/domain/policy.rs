//! Note access-control and slug rules
//!
//! Pure predicates with no I/O. Services combine them with repository
//! lookups; handlers never call them directly.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::{Note, User};
use crate::error::DomainError;

/// Appended to a slug that is already taken
pub const SLUG_IN_USE_WARNING: &str = " - already in use, choose another";

pub const INVALID_SLUG_MESSAGE: &str =
    "Enter a valid slug consisting of letters, numbers, underscores or hyphens.";

/// Whether `user` may view, edit or delete `note`.
///
/// Only the author may. Callers turn a `false` into the same not-found error
/// they use for a missing note.
pub fn can_view_or_modify(user: &User, note: &Note) -> bool {
    user.is(&note.author_id)
}

/// Filter a looked-up note through [`can_view_or_modify`].
///
/// A note that exists but belongs to someone else comes back as `NotFound`
/// with the same message a missing slug would produce.
pub fn visible_to(user: &User, slug: &str, note: Option<Note>) -> Result<Note, DomainError> {
    match note {
        Some(note) if can_view_or_modify(user, &note) => Ok(note),
        _ => Err(DomainError::NotFound(format!("Note '{}' not found", slug))),
    }
}

/// The identity attached to a request, or `NotAuthenticated`
pub fn require_authentication(identity: Option<User>) -> Result<User, DomainError> {
    identity.ok_or(DomainError::NotAuthenticated)
}

/// Accept `proposed` unless a note other than `editing` already uses it.
///
/// `holder` is whatever note currently stores that slug, if any.
pub fn check_slug_free(
    proposed: &str,
    holder: Option<&Note>,
    editing: Option<&Note>,
) -> Result<String, DomainError> {
    match (holder, editing) {
        (Some(h), Some(e)) if h.id == e.id => Ok(proposed.to_string()),
        (Some(_), _) => Err(DomainError::SlugConflict(proposed.to_string())),
        (None, _) => Ok(proposed.to_string()),
    }
}

/// Slugs may only contain ASCII letters, digits, `-` and `_`
pub fn is_valid_slug(slug: &str) -> bool {
    static SLUG_RE: OnceLock<Regex> = OnceLock::new();
    SLUG_RE
        .get_or_init(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern compiles"))
        .is_match(slug)
}
