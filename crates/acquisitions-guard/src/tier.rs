//! Per-role rate tiers.
//!
//! The table is static: one tier per role, looked up by role, never changed
//! at runtime.
//!
//! | role  | requests | window |
//! |-------|----------|--------|
//! | guest | 5        | 60s    |
//! | user  | 10       | 60s    |
//! | admin | 20       | 60s    |

use std::time::Duration;

use acquisitions_models::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTier {
    /// Unique per tier; part of every fingerprint.
    pub name: &'static str,
    pub window_secs: u64,
    pub max_requests: u64,
    pub message: &'static str,
}

impl RateTier {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

pub static GUEST_TIER: RateTier = RateTier {
    name: "guest-rate-limit",
    window_secs: 60,
    max_requests: 5,
    message: "Guest access. You have a limited rate limit of 5.",
};

pub static USER_TIER: RateTier = RateTier {
    name: "user-rate-limit",
    window_secs: 60,
    max_requests: 10,
    message: "User access. You have a standard rate limit of 10.",
};

pub static ADMIN_TIER: RateTier = RateTier {
    name: "admin-rate-limit",
    window_secs: 60,
    max_requests: 20,
    message: "Admin access. You have a higher rate limit of 20.",
};

/// Maps a role to its tier. Total over [`Role`]; anything that is not a
/// known account role has already collapsed to `Guest` upstream.
pub fn select_tier(role: Role) -> &'static RateTier {
    match role {
        Role::Admin => &ADMIN_TIER,
        Role::User => &USER_TIER,
        Role::Guest => &GUEST_TIER,
    }
}
