//! Session cookie helpers.
//!
//! The session token is written as a `Set-Cookie` header value and read back
//! from the request's `Cookie` header.

use acquisitions_config::CookieConfig;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;

fn with_options(config: &CookieConfig, value: &str, max_age: i64) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        config.name, value, max_age
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value carrying `token`.
pub fn session_cookie(config: &CookieConfig, token: &str) -> String {
    with_options(config, token, config.max_age_secs)
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn cleared_cookie(config: &CookieConfig) -> String {
    with_options(config, "", 0)
}

/// Value of the cookie named `name`, if present and non-empty.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    jar.get(name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}
