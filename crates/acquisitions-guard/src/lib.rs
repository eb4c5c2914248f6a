//! # Acquisitions Guard
//!
//! The decision core behind the API's security gate. Given who is calling
//! (their [`Role`](acquisitions_models::Role)) and what the request looks like,
//! it answers allow or deny, and why.
//!
//! - [`tier`]: the fixed per-role rate table (guest 5/min, user 10/min, admin 20/min)
//! - [`fingerprint`]: the `(tier, client)` key a window is counted under
//! - [`window`]: fixed-duration request windows, one per fingerprint
//! - [`heuristics`]: bot and shield classifiers
//! - [`engine`]: the [`DecisionEngine`] capability and its in-process implementation
//!
//! The crate knows nothing about HTTP frameworks; callers describe a request
//! with [`RequestMeta`].
//!
//! # Example
//!
//! ```ignore
//! use acquisitions_guard::{select_tier, Fingerprint, LocalDecisionEngine, DecisionEngine};
//!
//! let engine = LocalDecisionEngine::default();
//! let tier = select_tier(Role::Guest);
//! let fingerprint = Fingerprint::new(tier, "1.2.3.4");
//! let decision = engine.evaluate(&fingerprint, tier, &meta).await?;
//! ```

pub mod decision;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod heuristics;
pub mod request;
pub mod tier;
pub mod window;

pub use decision::{Decision, DenialReason};
pub use engine::{DecisionEngine, LocalDecisionEngine};
pub use error::EngineError;
pub use fingerprint::Fingerprint;
pub use heuristics::{BotDetector, BotSignal, Shield, ShieldSignal};
pub use request::RequestMeta;
pub use tier::{ADMIN_TIER, GUEST_TIER, RateTier, USER_TIER, select_tier};
pub use window::{SlidingWindowStore, WindowHit};
