//! Session middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::domain::entities::User;
use crate::domain::policy::require_authentication;
use crate::error::AppError;
use crate::AppState;

pub const SESSION_COOKIE: &str = "sessionid";

/// Extract the session token from the `sessionid` cookie, falling back to
/// an `Authorization: Bearer` header
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string());

    from_cookie.filter(|t| !t.is_empty()).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}

/// `Set-Cookie` value for a fresh session
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie
pub fn expired_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

async fn identify(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, AppError> {
    match token_from_headers(headers) {
        Some(token) => state.auth_service.authenticate(&token).await,
        None => Ok(None),
    }
}

/// Login-required middleware
///
/// Injects the `User` into request extensions. Anonymous callers are
/// redirected to the login page with `next` set to the requested path.
pub async fn login_required(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = identify(&state, request.headers()).await?;

    let user = require_authentication(identity).map_err(|_| AppError::LoginRequired {
        next: request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| request.uri().path().to_string()),
    })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Optional session middleware
///
/// Like `login_required` but never rejects. The `User` extension is only
/// present when the session is valid.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match identify(&state, request.headers()).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to resolve session"),
    }

    next.run(request).await
}
