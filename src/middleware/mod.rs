//! Middleware and extractors for cross-cutting request concerns.
//!
//! # Modules
//!
//! - [`identity`]: token lookup (cookie, then bearer header), caller resolution, client IP
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) extractor, 401 on a missing or bad token
//! - [`role`]: role gates answering 403 `Insufficient permissions`
//! - [`security`]: the global security gate (tiered rate limit, bot and shield screening)
//!
//! # Two call sites, one resolver
//!
//! Both the security gate and [`AuthUser`](auth::AuthUser) resolve the caller
//! through [`identity`]. They differ only in failure policy: the gate treats a
//! missing or invalid token as a guest, the extractor rejects it with 401.

pub mod auth;
pub mod identity;
pub mod role;
pub mod security;
