//! Submitted forms and field validation
//!
//! Forms arrive as `application/x-www-form-urlencoded`. Every field defaults
//! to empty so that a missing field is reported next to its name instead of
//! failing extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{SLUG_MAX_LENGTH, TITLE_MAX_LENGTH, USERNAME_MAX_LENGTH};
use crate::domain::policy::{is_valid_slug, INVALID_SLUG_MESSAGE};

pub const REQUIRED: &str = "This field is required.";
/// Key for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "__all__";
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages attached to `field`
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn max_length_message(max: usize, actual: usize) -> String {
    format!(
        "Ensure this value has at most {} characters (it has {}).",
        max, actual
    )
}

/// Create/edit form for a note
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    /// Blank means "derive from the title"
    #[serde(default)]
    pub slug: String,
}

impl NoteForm {
    /// Field checks that need no storage access
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        let title_len = self.title.chars().count();
        if self.title.trim().is_empty() {
            errors.add("title", REQUIRED);
        } else if title_len > TITLE_MAX_LENGTH {
            errors.add("title", max_length_message(TITLE_MAX_LENGTH, title_len));
        }

        if self.text.trim().is_empty() {
            errors.add("text", REQUIRED);
        }

        let slug = self.slug.trim();
        if !slug.is_empty() {
            let slug_len = slug.chars().count();
            if slug_len > SLUG_MAX_LENGTH {
                errors.add("slug", max_length_message(SLUG_MAX_LENGTH, slug_len));
            } else if !is_valid_slug(slug) {
                errors.add("slug", INVALID_SLUG_MESSAGE);
            }
        }

        errors.into_result()
    }

    /// The slug as submitted, if any
    pub fn submitted_slug(&self) -> Option<&str> {
        Some(self.slug.trim()).filter(|s| !s.is_empty())
    }
}

/// Login form. `next` may also come from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.username.trim().is_empty() {
            errors.add("username", REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.into_result()
    }
}

/// Signup form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password1: String,
    #[serde(default, skip_serializing)]
    pub password2: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        let username = self.username.trim();
        let username_len = username.chars().count();
        if username.is_empty() {
            errors.add("username", REQUIRED);
        } else if username_len > USERNAME_MAX_LENGTH {
            errors.add(
                "username",
                max_length_message(USERNAME_MAX_LENGTH, username_len),
            );
        }

        if self.password1.is_empty() {
            errors.add("password1", REQUIRED);
        } else if self.password1.chars().count() < PASSWORD_MIN_LENGTH {
            errors.add(
                "password1",
                format!(
                    "This password is too short. It must contain at least {} characters.",
                    PASSWORD_MIN_LENGTH
                ),
            );
        }

        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        } else if self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn't match.");
        }

        errors.into_result()
    }
}
