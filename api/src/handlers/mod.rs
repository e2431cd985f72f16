//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod accounts;
pub mod notes;
pub mod pages;

pub use accounts::{login, login_page, logout, signup, signup_page};
pub use notes::{
    add_note, add_note_form, delete_note, delete_note_confirm, edit_note, edit_note_form,
    list_notes, note_detail,
};
pub use pages::{home, success};
