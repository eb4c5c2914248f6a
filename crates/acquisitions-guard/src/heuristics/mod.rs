//! Request classifiers that run ahead of rate limiting.
//!
//! Both are pure functions of the request metadata: no state, no I/O.

pub mod bot;
pub mod shield;

pub use bot::{BotDetector, BotSignal};
pub use shield::{Shield, ShieldSignal};
