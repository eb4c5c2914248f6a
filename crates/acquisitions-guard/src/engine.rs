//! Policy evaluation.
//!
//! [`DecisionEngine`] is the seam the HTTP layer calls through. The shipped
//! [`LocalDecisionEngine`] keeps its windows in process memory; a shared
//! backend would implement the same trait.

use async_trait::async_trait;

use crate::decision::{Decision, DenialReason};
use crate::error::EngineError;
use crate::fingerprint::Fingerprint;
use crate::heuristics::{BotDetector, Shield};
use crate::request::RequestMeta;
use crate::tier::RateTier;
use crate::window::SlidingWindowStore;

#[async_trait]
pub trait DecisionEngine: Send + Sync {
    /// Evaluates one request against the bot rule, the shield and `tier`'s
    /// rate limit. Every call is counted toward the fingerprint's window,
    /// whatever the outcome.
    async fn evaluate(
        &self,
        fingerprint: &Fingerprint,
        tier: &RateTier,
        request: &RequestMeta,
    ) -> Result<Decision, EngineError>;
}

#[derive(Clone, Default)]
pub struct LocalDecisionEngine {
    windows: SlidingWindowStore,
    bots: BotDetector,
    shield: Shield,
}

impl LocalDecisionEngine {
    pub fn new(windows: SlidingWindowStore) -> Self {
        Self {
            windows,
            bots: BotDetector::new(),
            shield: Shield::new(),
        }
    }

    pub fn windows(&self) -> &SlidingWindowStore {
        &self.windows
    }
}

#[async_trait]
impl DecisionEngine for LocalDecisionEngine {
    async fn evaluate(
        &self,
        fingerprint: &Fingerprint,
        tier: &RateTier,
        request: &RequestMeta,
    ) -> Result<Decision, EngineError> {
        let hit = self.windows.hit(fingerprint, tier);

        if let Some(signal) = self.bots.classify(request.user_agent.as_deref()) {
            tracing::debug!(%fingerprint, %signal, "Bot rule matched");
            return Ok(Decision::deny(DenialReason::Bot, "detect-bot"));
        }

        if let Some(signal) = self.shield.inspect(request) {
            tracing::debug!(%fingerprint, %signal, "Shield rule matched");
            return Ok(Decision::deny(DenialReason::Shield, "shield"));
        }

        if hit.exceeds(tier) {
            tracing::debug!(
                %fingerprint,
                count = hit.count,
                limit = tier.max_requests,
                reset_after_secs = hit.reset_after.as_secs(),
                "Rate limit exceeded"
            );
            return Ok(Decision::deny(DenialReason::RateLimit, tier.name));
        }

        Ok(Decision::allow(tier))
    }
}
