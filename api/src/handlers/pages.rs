//! Static pages
//!
//! Home page and the page shown after a successful create, edit or delete.

use axum::{Extension, Json};
use serde::Serialize;

use crate::domain::entities::User;
use crate::routes::Route;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
    /// Username of the logged-in caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub links: Links,
}

#[derive(Debug, Serialize)]
pub struct Links {
    pub notes: String,
    pub add: String,
    pub login: String,
    pub logout: String,
    pub signup: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /
///
/// Public landing page.
pub async fn home(user: Option<Extension<User>>) -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Keep short notes, each with its own address.",
        user: user.map(|Extension(u)| u.username),
        links: Links {
            notes: Route::List.path(),
            add: Route::Add.path(),
            login: Route::Login.path(),
            logout: Route::Logout.path(),
            signup: Route::Signup.path(),
        },
    })
}

/// GET /done/
///
/// Landing page after create, edit and delete.
pub async fn success() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Done. Your change has been saved.",
    })
}
