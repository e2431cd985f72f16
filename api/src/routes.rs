//! Named routes
//!
//! Every path the service exposes has a name here. Handlers build redirect
//! targets with [`Route::path`] instead of hard-coding strings, and the router
//! registers the matching axum patterns from [`pattern`].

/// A named route with its positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    List,
    Add,
    Detail(String),
    Edit(String),
    Delete(String),
    Success,
    Login,
    Logout,
    Signup,
}

impl Route {
    /// The concrete path for this route (the `reverse` operation)
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::List => "/notes/".to_string(),
            Route::Add => "/add/".to_string(),
            Route::Detail(slug) => format!("/note/{}/", urlencoding::encode(slug)),
            Route::Edit(slug) => format!("/edit/{}/", urlencoding::encode(slug)),
            Route::Delete(slug) => format!("/delete/{}/", urlencoding::encode(slug)),
            Route::Success => "/done/".to_string(),
            Route::Login => "/auth/login/".to_string(),
            Route::Logout => "/auth/logout/".to_string(),
            Route::Signup => "/auth/signup/".to_string(),
        }
    }
}

/// axum path patterns, one per route name
pub mod pattern {
    pub const HOME: &str = "/";
    pub const LIST: &str = "/notes/";
    pub const ADD: &str = "/add/";
    pub const DETAIL: &str = "/note/:slug/";
    pub const EDIT: &str = "/edit/:slug/";
    pub const DELETE: &str = "/delete/:slug/";
    pub const SUCCESS: &str = "/done/";
    pub const LOGIN: &str = "/auth/login/";
    pub const LOGOUT: &str = "/auth/logout/";
    pub const SIGNUP: &str = "/auth/signup/";
}

/// Look up a route by name
#[cfg(test)]
pub fn reverse(name: &str, args: &[&str]) -> Option<String> {
    let route = match (name, args) {
        ("home", []) => Route::Home,
        ("list", []) => Route::List,
        ("add", []) => Route::Add,
        ("success", []) => Route::Success,
        ("login", []) => Route::Login,
        ("logout", []) => Route::Logout,
        ("signup", []) => Route::Signup,
        ("detail", [slug]) => Route::Detail(slug.to_string()),
        ("edit", [slug]) => Route::Edit(slug.to_string()),
        ("delete", [slug]) => Route::Delete(slug.to_string()),
        _ => return None,
    };
    Some(route.path())
}

/// `<login>?next=<path>` with the path query-encoded and slashes kept literal
pub fn login_redirect_url(next: &str) -> String {
    let encoded = urlencoding::encode(next).replace("%2F", "/");
    format!("{}?next={}", Route::Login.path(), encoded)
}

/// Accept only local redirect targets
pub fn safe_next(next: Option<&str>) -> Option<String> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
        .map(str::to_string)
}
