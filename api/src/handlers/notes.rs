//! Note handlers
//!
//! Create, list, show, edit and delete notes. Every handler here sits behind
//! the login-required middleware and receives the caller as `Extension<User>`.

use axum::{
    extract::{Path, State},
    response::Response,
    Extension, Form, Json,
};
use serde::Serialize;

use crate::app::{FormErrors, NoteForm};
use crate::domain::entities::{Note, User};
use crate::error::{found, AppError};
use crate::routes::Route;
use crate::AppState;

/// A note as returned to its author
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: String,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub created_at: String,
    pub url: String,
    pub edit_url: String,
    pub delete_url: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        NoteResponse {
            id: note.id.to_string(),
            url: Route::Detail(note.slug.clone()).path(),
            edit_url: Route::Edit(note.slug.clone()).path(),
            delete_url: Route::Delete(note.slug.clone()).path(),
            title: note.title,
            text: note.text,
            slug: note.slug,
            created_at: note.created_at.to_rfc3339(),
        }
    }
}

/// An empty or prefilled form
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub form: NoteForm,
    pub errors: FormErrors,
}

#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub note: NoteResponse,
    pub message: &'static str,
}

/// GET /notes/
///
/// The caller's notes.
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let notes = state.note_service.list(&user).await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// GET /add/
pub async fn add_note_form() -> Json<FormPage> {
    Json(FormPage {
        form: NoteForm::default(),
        errors: FormErrors::default(),
    })
}

/// POST /add/
///
/// Create a note, then redirect to the success page.
pub async fn add_note(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Form(form): Form<NoteForm>,
) -> Result<Response, AppError> {
    state.note_service.create(&user, &form).await?;
    Ok(found(&Route::Success.path()))
}

/// GET /note/:slug/
pub async fn note_detail(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
) -> Result<Json<NoteResponse>, AppError> {
    let note = state.note_service.get(&user, &slug).await?;
    Ok(Json(note.into()))
}

/// GET /edit/:slug/
///
/// The edit form, prefilled with the current values.
pub async fn edit_note_form(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
) -> Result<Json<FormPage>, AppError> {
    let note = state.note_service.get(&user, &slug).await?;
    Ok(Json(FormPage {
        form: NoteForm {
            title: note.title,
            text: note.text,
            slug: note.slug,
        },
        errors: FormErrors::default(),
    }))
}

/// POST /edit/:slug/
pub async fn edit_note(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
    Form(form): Form<NoteForm>,
) -> Result<Response, AppError> {
    state.note_service.edit(&user, &slug, &form).await?;
    Ok(found(&Route::Success.path()))
}

/// GET /delete/:slug/
///
/// Confirmation page for the author.
pub async fn delete_note_confirm(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    let note = state.note_service.get(&user, &slug).await?;
    Ok(Json(DeleteConfirmation {
        note: note.into(),
        message: "Delete this note? Send POST or DELETE to confirm.",
    }))
}

/// POST|DELETE /delete/:slug/
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    state.note_service.delete(&user, &slug).await?;
    Ok(found(&Route::Success.path()))
}
