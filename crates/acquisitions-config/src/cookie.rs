//! Session cookie options.
//!
//! The session token travels in an `HttpOnly`, `SameSite=Strict` cookie named
//! `token`. The `Secure` flag is only set when `APP_ENV=production` so that
//! local development over plain HTTP keeps working.
//!
//! - `COOKIE_MAX_AGE`: lifetime in seconds (default: 900, fifteen minutes)
//! - `APP_ENV`: `production` turns on `Secure`

use std::env;

use crate::env_or;

pub const TOKEN_COOKIE_NAME: &str = "token";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub max_age_secs: i64,
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: TOKEN_COOKIE_NAME.to_string(),
            max_age_secs: 15 * 60,
            secure: false,
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            name: TOKEN_COOKIE_NAME.to_string(),
            max_age_secs: env_or("COOKIE_MAX_AGE", 15 * 60),
            secure: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }
}
