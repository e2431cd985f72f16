//! Account handlers
//!
//! Login, logout and signup.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::app::{FormErrors, LoginForm, SignupForm};
use crate::auth::{expired_session_cookie, session_cookie, token_from_headers};
use crate::error::{found, AppError};
use crate::routes::{safe_next, Route};
use crate::AppState;

/// `?next=` on the login page
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub form: LoginForm,
    pub errors: FormErrors,
}

#[derive(Debug, Serialize)]
pub struct SignupPage {
    pub form: SignupForm,
    pub errors: FormErrors,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
    pub login_url: String,
}

/// GET /auth/login/
pub async fn login_page(Query(query): Query<NextQuery>) -> Json<LoginPage> {
    Json(LoginPage {
        form: LoginForm {
            next: safe_next(query.next.as_deref()),
            ..LoginForm::default()
        },
        errors: FormErrors::default(),
    })
}

/// POST /auth/login/
///
/// Start a session and redirect to `next`, or to the note list.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let (user, token) = state.auth_service.login(&form).await?;

    let target = safe_next(form.next.as_deref().or(query.next.as_deref()))
        .unwrap_or_else(|| Route::List.path());

    tracing::info!(user_id = %user.id, "User logged in");

    let mut response = found(&target);
    set_cookie(
        &mut response,
        &session_cookie(&token, state.config.session_cookie_secure),
    )?;
    Ok(response)
}

/// GET|POST /auth/logout/
///
/// End the current session, if any.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(token) = token_from_headers(&headers) {
        state.auth_service.logout(&token).await?;
    }

    let mut response = Json(LogoutResponse {
        message: "You have been logged out.",
        login_url: Route::Login.path(),
    })
    .into_response();
    set_cookie(&mut response, &expired_session_cookie())?;
    Ok(response)
}

/// GET /auth/signup/
pub async fn signup_page() -> Json<SignupPage> {
    Json(SignupPage {
        form: SignupForm::default(),
        errors: FormErrors::default(),
    })
}

/// POST /auth/signup/
///
/// Create an account, then send the user to the login page.
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    state.auth_service.signup(&form).await?;
    Ok(found(&Route::Login.path()))
}

fn set_cookie(response: &mut Response, cookie: &str) -> Result<(), AppError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(())
}
