//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod auth_service;
pub mod forms;
pub mod note_service;

pub use auth_service::AuthService;
pub use forms::{FormErrors, LoginForm, NoteForm, SignupForm};
pub use note_service::NoteService;
