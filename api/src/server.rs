//! Application wiring
//!
//! Builds the shared state from a database connection and assembles the
//! router. `main` and the HTTP tests both go through here.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use chrono::Duration;
use sea_orm::DatabaseConnection;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::{
    SqlNoteRepository, SqlSessionRepository, SqlUserRepository, TransliteratingSlugifier,
};
use crate::app::{AuthService, NoteService};
use crate::auth;
use crate::config::Config;
use crate::handlers;
use crate::routes::pattern;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub note_service: Arc<NoteService<SqlNoteRepository, TransliteratingSlugifier>>,
    pub auth_service: Arc<AuthService<SqlUserRepository, SqlSessionRepository>>,
    pub config: Config,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let note_repo = Arc::new(SqlNoteRepository::new(db.clone()));
        let user_repo = Arc::new(SqlUserRepository::new(db.clone()));
        let session_repo = Arc::new(SqlSessionRepository::new(db));
        let session_max_age = Duration::seconds(config.session_max_age_secs);

        Self {
            note_service: Arc::new(NoteService::new(
                note_repo,
                Arc::new(TransliteratingSlugifier),
            )),
            auth_service: Arc::new(AuthService::new(user_repo, session_repo, session_max_age)),
            config,
        }
    }
}

/// Build the full router
pub fn build_router(state: AppState) -> Router {
    // Everything here needs a logged-in user
    let protected = Router::new()
        .route(pattern::LIST, get(handlers::list_notes))
        .route(
            pattern::ADD,
            get(handlers::add_note_form).post(handlers::add_note),
        )
        .route(pattern::DETAIL, get(handlers::note_detail))
        .route(
            pattern::EDIT,
            get(handlers::edit_note_form).post(handlers::edit_note),
        )
        .route(
            pattern::DELETE,
            get(handlers::delete_note_confirm)
                .post(handlers::delete_note)
                .delete(handlers::delete_note),
        )
        .route(pattern::SUCCESS, get(handlers::success))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::login_required,
        ));

    let mut accounts = Router::new()
        .route(
            pattern::LOGIN,
            get(handlers::login_page).post(handlers::login),
        )
        .route(
            pattern::SIGNUP,
            get(handlers::signup_page).post(handlers::signup),
        );

    if state.config.auth_rate_limit {
        // Uses PeerIpKeyExtractor, so the server must be started with connect info
        match GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(state.config.auth_rate_limit_per_second)
            .burst_size(state.config.auth_rate_limit_burst)
            .finish()
        {
            Some(governor_config) => {
                accounts = accounts.layer(GovernorLayer {
                    config: Arc::new(governor_config),
                });
            }
            None => tracing::error!("Invalid rate limit settings, login is not rate limited"),
        }
    }

    Router::new()
        .route(pattern::HOME, get(handlers::home))
        .route(
            pattern::LOGOUT,
            get(handlers::logout).post(handlers::logout),
        )
        .merge(accounts)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::session_middleware,
        ))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
