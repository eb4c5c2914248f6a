//! # Acquisitions API
//!
//! A REST API built with Rust and Axum offering account sign-up/sign-in,
//! cookie-carried JWT sessions, role-based authorization and user management,
//! with every request passing through a role-aware security gate.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Identity resolution, auth extractor, role gate, security gate
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Sign-up, sign-in, sign-out
//! │   ├── users/       # User CRUD
//! │   └── health/      # Root, health and welcome routes
//! ├── cookies.rs        # Session cookie helpers
//! ├── router.rs         # Route table and global layers
//! └── state.rs          # Shared application state
//! ```
//!
//! Workspace crates carry the reusable parts: errors and password hashing
//! (`acquisitions-core`), env config (`acquisitions-config`), models
//! (`acquisitions-models`), tokens (`acquisitions-auth`), storage
//! (`acquisitions-db`) and the rate/bot/shield decision core
//! (`acquisitions-guard`).
//!
//! ## Security Gate
//!
//! Mounted globally, ahead of every route. Each request is attributed to a
//! role (guest when there is no valid token), counted against that role's
//! tier and screened by the bot and shield heuristics:
//!
//! | role  | requests per minute |
//! |-------|---------------------|
//! | guest | 5                   |
//! | user  | 10                  |
//! | admin | 20                  |
//!
//! Denials answer `403 {"error":"Forbidden","message":...}`; a failing
//! decision engine answers 500.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod cookies;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use acquisitions_auth;
pub use acquisitions_config;
pub use acquisitions_core;
pub use acquisitions_db;
pub use acquisitions_guard;
pub use acquisitions_models;
