//! Unified error types for the notes API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::app::forms::FormErrors;
use crate::domain::policy::SLUG_IN_USE_WARNING;
use crate::routes::{login_redirect_url, Route};

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing entity. Also returned when the caller does not own the entity,
    /// so both cases look the same from the outside.
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}{}", SLUG_IN_USE_WARNING)]
    SlugConflict(String),

    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Database error: {0}")]
    Database(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A submission failed validation. The submitted fields are echoed back
    /// together with per-field messages.
    #[error("Invalid form submission")]
    InvalidForm {
        form: serde_json::Value,
        errors: FormErrors,
    },

    /// Protected route hit without a session. `next` is the original path.
    #[error("Login required")]
    LoginRequired { next: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_form(form: impl Serialize, errors: FormErrors) -> Self {
        AppError::InvalidForm {
            form: serde_json::to_value(form).unwrap_or(serde_json::Value::Null),
            errors,
        }
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Body returned with a rejected form
#[derive(Serialize)]
struct InvalidFormResponse<'a> {
    form: &'a serde_json::Value,
    errors: &'a FormErrors,
}

/// 302 Found with a `Location` header
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidForm { form, errors } => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(InvalidFormResponse { form, errors }),
                )
                    .into_response();
            }
            AppError::LoginRequired { next } => {
                return found(&login_redirect_url(next));
            }
            AppError::Domain(DomainError::NotAuthenticated) => {
                return found(&Route::Login.path());
            }
            AppError::Domain(DomainError::NotFound(_)) => {
                // Never echo which lookup failed: a note owned by someone else
                // must be indistinguishable from one that does not exist.
                (StatusCode::NOT_FOUND, "Not found", None)
            }
            AppError::Domain(DomainError::AlreadyExists(msg)) => {
                (StatusCode::CONFLICT, "Already exists", Some(msg.clone()))
            }
            AppError::Domain(e @ DomainError::SlugConflict(_)) => {
                (StatusCode::CONFLICT, "Conflict", Some(e.to_string()))
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
