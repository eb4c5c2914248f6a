//! # Acquisitions Config
//!
//! Configuration types for the Acquisitions API, loaded from environment
//! variables with sensible defaults:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cookie`]: options for the `token` session cookie
//! - [`cors`]: CORS allowed origins
//! - [`security`]: operating mode and limits of the request security gate
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use acquisitions_config::{JwtConfig, SecurityConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let security_config = SecurityConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod security;
pub mod server;

// Re-export commonly used types at crate root
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use security::{SecurityConfig, SecurityMode};
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when it is unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
