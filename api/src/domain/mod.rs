//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `policy`: Who may touch a note, and what makes a slug acceptable
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod policy;
pub mod ports;
