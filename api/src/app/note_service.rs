//! Note service
//!
//! Create, read, edit and delete notes on behalf of an authenticated user.
//! Every lookup goes through the ownership policy, so a note written by
//! someone else is reported exactly like a missing one.

use std::sync::Arc;

use crate::app::forms::{FormErrors, NoteForm};
use crate::domain::entities::{NewNote, Note, NoteChanges, User, SLUG_MAX_LENGTH};
use crate::domain::policy::{check_slug_free, visible_to};
use crate::domain::ports::{NoteRepository, Slugifier};
use crate::error::{AppError, DomainError};

pub const UNDERIVABLE_SLUG: &str =
    "Could not build a slug from the title, please enter one.";

/// Service for managing notes
pub struct NoteService<NR, SL>
where
    NR: NoteRepository,
    SL: Slugifier,
{
    notes: Arc<NR>,
    slugifier: Arc<SL>,
}

impl<NR, SL> NoteService<NR, SL>
where
    NR: NoteRepository,
    SL: Slugifier,
{
    pub fn new(notes: Arc<NR>, slugifier: Arc<SL>) -> Self {
        Self { notes, slugifier }
    }

    /// Notes written by `user`
    pub async fn list(&self, user: &User) -> Result<Vec<Note>, AppError> {
        Ok(self.notes.list_by_author(&user.id).await?)
    }

    /// A note `user` is allowed to see, or `NotFound`
    pub async fn get(&self, user: &User, slug: &str) -> Result<Note, AppError> {
        let note = self.notes.find_by_slug(slug).await?;
        Ok(visible_to(user, slug, note)?)
    }

    /// Total number of stored notes
    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.notes.count().await?)
    }

    /// Accept `proposed` if no other note uses it.
    ///
    /// `editing` is the note being edited; keeping its own slug is fine.
    pub async fn validate_slug(
        &self,
        proposed: &str,
        editing: Option<&Note>,
    ) -> Result<String, DomainError> {
        let holder = self.notes.find_by_slug(proposed).await?;
        check_slug_free(proposed, holder.as_ref(), editing)
    }

    /// Create a note owned by `user`
    pub async fn create(&self, user: &User, form: &NoteForm) -> Result<Note, AppError> {
        let slug = self.clean(form, None).await?;

        let new_note = NewNote {
            title: form.title.trim().to_string(),
            text: form.text.clone(),
            slug,
            author_id: user.id,
        };

        let note = self
            .notes
            .create(&new_note)
            .await
            .map_err(|e| slug_conflict_to_form(e, form))?;

        tracing::info!(note_id = %note.id, slug = %note.slug, author = %user.id, "Note created");
        Ok(note)
    }

    /// Replace title, text and slug of a note owned by `user`
    pub async fn edit(&self, user: &User, slug: &str, form: &NoteForm) -> Result<Note, AppError> {
        let note = self.get(user, slug).await?;
        let new_slug = self.clean(form, Some(&note)).await?;

        let changes = NoteChanges {
            title: form.title.trim().to_string(),
            text: form.text.clone(),
            slug: new_slug,
        };

        let updated = self
            .notes
            .update(&note.id, &changes)
            .await
            .map_err(|e| slug_conflict_to_form(e, form))?;

        tracing::info!(note_id = %updated.id, slug = %updated.slug, "Note edited");
        Ok(updated)
    }

    /// Delete a note owned by `user`
    pub async fn delete(&self, user: &User, slug: &str) -> Result<Note, AppError> {
        let note = self.get(user, slug).await?;
        self.notes.delete(&note.id).await?;

        tracing::info!(note_id = %note.id, slug = %note.slug, "Note deleted");
        Ok(note)
    }

    /// Validate a submission and settle its slug.
    ///
    /// A blank slug is derived from the title. All field errors are collected
    /// before giving up so the caller sees them together.
    async fn clean(&self, form: &NoteForm, editing: Option<&Note>) -> Result<String, AppError> {
        let mut errors = form.validate().err().unwrap_or_default();

        let slug = match form.submitted_slug() {
            Some(slug) => Some(slug.to_string()),
            None if !form.title.trim().is_empty() => {
                let derived: String = self
                    .slugifier
                    .slugify(form.title.trim())
                    .chars()
                    .take(SLUG_MAX_LENGTH)
                    .collect();
                if derived.is_empty() {
                    errors.add("slug", UNDERIVABLE_SLUG);
                    None
                } else {
                    Some(derived)
                }
            }
            None => None,
        };

        // Only check uniqueness for a slug that passed field validation
        if let Some(ref slug) = slug {
            if errors.field("slug").is_empty() {
                match self.validate_slug(slug, editing).await {
                    Ok(_) => {}
                    Err(e @ DomainError::SlugConflict(_)) => errors.add("slug", e.to_string()),
                    Err(e) => return Err(e.into()),
                }
            }
        }

        match (slug, errors.is_empty()) {
            (Some(slug), true) => Ok(slug),
            _ => Err(AppError::invalid_form(form, errors)),
        }
    }
}

/// A unique violation that slipped past the pre-check becomes a form error
fn slug_conflict_to_form(err: DomainError, form: &NoteForm) -> AppError {
    match err {
        e @ DomainError::SlugConflict(_) => {
            let mut errors = FormErrors::default();
            errors.add("slug", e.to_string());
            AppError::invalid_form(form, errors)
        }
        e => e.into(),
    }
}
