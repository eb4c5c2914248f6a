//! Security gate configuration.
//!
//! The per-role rate tiers are fixed in code and deliberately absent here;
//! this config only controls how the gate runs.
//!
//! # Environment Variables
//!
//! - `SECURITY_MODE`: `live` (default) enforces denials, `dry_run` only logs them
//! - `SECURITY_EVALUATION_TIMEOUT_MS`: upper bound for one decision (default: 50)
//! - `SECURITY_CLEANUP_INTERVAL_SECS`: how often stale windows are purged (default: 60)
//! - `SECURITY_TRUST_PROXY_HEADERS`: read client IP from `X-Forwarded-For` /
//!   `X-Real-IP` (default: false). Enable only behind a reverse proxy that
//!   overwrites these headers; otherwise clients pick their own address.

use std::str::FromStr;
use std::time::Duration;

use crate::env_or;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SecurityMode {
    /// Denials are enforced.
    #[default]
    Live,
    /// Decisions are computed and logged, every request passes.
    DryRun,
}

impl FromStr for SecurityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(SecurityMode::Live),
            "dry_run" | "dry-run" | "dryrun" => Ok(SecurityMode::DryRun),
            other => Err(format!("unknown security mode: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityConfig {
    pub mode: SecurityMode,
    pub evaluation_timeout: Duration,
    pub cleanup_interval: Duration,
    pub trust_proxy_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            mode: SecurityMode::Live,
            evaluation_timeout: Duration::from_millis(50),
            cleanup_interval: Duration::from_secs(60),
            trust_proxy_headers: false,
        }
    }
}

impl SecurityConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            mode: env_or("SECURITY_MODE", SecurityMode::Live),
            evaluation_timeout: Duration::from_millis(env_or(
                "SECURITY_EVALUATION_TIMEOUT_MS",
                50,
            )),
            cleanup_interval: Duration::from_secs(env_or("SECURITY_CLEANUP_INTERVAL_SECS", 60)),
            trust_proxy_headers: env_or("SECURITY_TRUST_PROXY_HEADERS", false),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode == SecurityMode::DryRun
    }
}
