//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Service tests use the in-memory repositories in `mocks`. HTTP tests run
//! the real router over an in-memory SQLite database built by `app`.

pub mod app;
pub mod fixtures;
pub mod mocks;

pub use app::*;
pub use fixtures::*;
pub use mocks::*;
