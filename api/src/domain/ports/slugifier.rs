//! Slug derivation port
//!
//! Turns a note title into a slug when the author leaves the slug blank.
//! Which transliteration is used is up to the adapter.

pub trait Slugifier: Send + Sync {
    /// Derive a slug from free text. May return an empty string when nothing
    /// in `text` can be represented.
    fn slugify(&self, text: &str) -> String;
}
