//! # Acquisitions Models
//!
//! Domain models and DTOs for the Acquisitions API.
//!
//! - [`roles`]: the closed [`Role`] enumeration (`guest`, `user`, `admin`)
//! - [`users`]: the user entity, its stored form and update DTOs
//! - [`auth`]: sign-up / sign-in request and response DTOs

pub mod auth;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, MessageResponse, SignInDto, SignUpDto, UserSummary};
pub use roles::Role;
pub use users::{NewUser, UpdateUserDto, User, UserChanges, UserRecord};
