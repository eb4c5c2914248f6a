//! # Acquisitions Auth
//!
//! Token issuing/verification and the caller identity derived from it.
//!
//! - [`claims`]: the JWT payload `{id, email, role}`
//! - [`jwt`]: [`create_access_token`] and [`verify_token`]
//! - [`principal`]: [`Principal`], the per-request caller identity
//!
//! # Example
//!
//! ```ignore
//! use acquisitions_auth::{create_access_token, verify_token, Principal};
//! use acquisitions_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(42, "ada@example.com", Role::User, &config)?;
//! let principal = Principal::from(verify_token(&token, &config)?);
//! ```

pub mod claims;
pub mod jwt;
pub mod principal;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use principal::Principal;
