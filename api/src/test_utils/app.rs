//! Full application over an in-memory SQLite database
//!
//! Used by the HTTP tests. Each `TestApp` owns its own database, so tests
//! never see each other's rows.

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::app::{NoteForm, SignupForm};
use crate::auth::SESSION_COOKIE;
use crate::config::Config;
use crate::domain::entities::{Note, User};
use crate::entity::create_schema;
use crate::server::{build_router, AppState};

pub const TEST_PASSWORD: &str = "test-password-123";

/// Fresh in-memory SQLite database with the schema applied
pub async fn test_db() -> DatabaseConnection {
    // A single connection: every new in-memory connection is a new database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    create_schema(&db).await.expect("Failed to create schema");
    db
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        auth_rate_limit: false,
        ..Config::default()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = AppState::new(test_db().await, test_config());
        let server =
            TestServer::new(build_router(state.clone())).expect("Failed to start test server");
        Self { server, state }
    }

    /// Serve over a real socket with peer addresses, as `main` does, so
    /// per-IP rate limiting sees a client address
    pub async fn with_config(config: Config) -> Self {
        let state = AppState::new(test_db().await, config);
        let app = build_router(state.clone()).into_make_service_with_connect_info::<SocketAddr>();
        let server = TestServer::builder()
            .http_transport()
            .build(app)
            .expect("Failed to start test server");
        Self { server, state }
    }

    /// Sign a user up with [`TEST_PASSWORD`]
    pub async fn create_user(&self, username: &str) -> User {
        self.state
            .auth_service
            .signup(&SignupForm {
                username: username.to_string(),
                password1: TEST_PASSWORD.to_string(),
                password2: TEST_PASSWORD.to_string(),
            })
            .await
            .expect("Failed to create user")
    }

    /// Cookie header for a logged-in session, like `force_login`
    pub async fn login(&self, user: &User) -> (HeaderName, HeaderValue) {
        let token = self
            .state
            .auth_service
            .force_login(user)
            .await
            .expect("Failed to start session");
        let value = HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, token))
            .expect("Valid cookie");
        (axum::http::header::COOKIE, value)
    }

    pub async fn create_note(&self, author: &User, title: &str, text: &str, slug: &str) -> Note {
        self.state
            .note_service
            .create(
                author,
                &NoteForm {
                    title: title.to_string(),
                    text: text.to_string(),
                    slug: slug.to_string(),
                },
            )
            .await
            .expect("Failed to create note")
    }

    pub async fn note_count(&self) -> u64 {
        self.state
            .note_service
            .count()
            .await
            .expect("Failed to count notes")
    }
}
