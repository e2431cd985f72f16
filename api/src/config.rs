use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// PostgreSQL or SQLite URL
    pub database_url: String,
    pub port: u16,
    /// Add `Secure` to the session cookie (set behind HTTPS)
    pub session_cookie_secure: bool,
    /// Sessions older than this many seconds are rejected and deleted
    pub session_max_age_secs: i64,
    /// Rate limit login and signup per peer IP
    pub auth_rate_limit: bool,
    pub auth_rate_limit_per_second: u64,
    pub auth_rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://notes.db?mode=rwc".to_string(),
            port: 8080,
            session_cookie_secure: false,
            session_max_age_secs: 14 * 24 * 60 * 60,
            auth_rate_limit: true,
            auth_rate_limit_per_second: 2,
            auth_rate_limit_burst: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            port: parse_var("PORT").unwrap_or(defaults.port),
            session_cookie_secure: parse_flag("SESSION_COOKIE_SECURE")
                .unwrap_or(defaults.session_cookie_secure),
            session_max_age_secs: parse_var("SESSION_MAX_AGE")
                .unwrap_or(defaults.session_max_age_secs),
            auth_rate_limit: parse_flag("AUTH_RATE_LIMIT").unwrap_or(defaults.auth_rate_limit),
            auth_rate_limit_per_second: parse_var("AUTH_RATE_LIMIT_PER_SECOND")
                .unwrap_or(defaults.auth_rate_limit_per_second),
            auth_rate_limit_burst: parse_var("AUTH_RATE_LIMIT_BURST")
                .unwrap_or(defaults.auth_rate_limit_burst),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}
