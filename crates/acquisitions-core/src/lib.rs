//! # Acquisitions Core
//!
//! Foundational types shared by every crate of the Acquisitions API:
//!
//! - [`errors`]: the [`AppError`] type and its JSON response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use acquisitions_core::{AppError, hash_password};
//!
//! let hash = hash_password("correct horse")?;
//! let missing = AppError::not_found(anyhow::anyhow!("User not found"));
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
