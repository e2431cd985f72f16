//! Session authentication
//!
//! Resolves the caller's identity from the session cookie (or a bearer
//! token) and attaches it to the request as an explicit `User` extension.

pub mod session;

pub use session::{
    expired_session_cookie, login_required, session_cookie, session_middleware,
    token_from_headers, SESSION_COOKIE,
};
