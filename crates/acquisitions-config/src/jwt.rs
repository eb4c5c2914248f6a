//! JWT signing configuration.

use std::env;

use crate::env_or;

/// Default token lifetime: one day.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 86_400;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "your-secret-key".to_string(),
            expires_in: DEFAULT_EXPIRES_IN_SECS,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| Self::default().secret),
            expires_in: env_or("JWT_EXPIRES_IN", DEFAULT_EXPIRES_IN_SECS),
        }
    }
}
