use std::fmt;

use crate::tier::RateTier;

/// Why a request was denied. Variant order is reporting precedence:
/// bot, then shield, then rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialReason {
    None,
    Bot,
    Shield,
    RateLimit,
}

impl DenialReason {
    /// Text returned to the caller in the 403 body.
    pub fn message(&self) -> &'static str {
        match self {
            DenialReason::None => "",
            DenialReason::Bot => "Automated requests are not allowed",
            DenialReason::Shield => "Request blocked by security policy",
            DenialReason::RateLimit => "Too many requests",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::None => "none",
            DenialReason::Bot => "bot",
            DenialReason::Shield => "shield",
            DenialReason::RateLimit => "rate_limit",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub reason: DenialReason,
    pub message: String,
    /// Name of the rule that fired, for logs only.
    pub rule: Option<&'static str>,
}

impl Decision {
    pub fn allow(tier: &RateTier) -> Self {
        Self {
            allowed: true,
            reason: DenialReason::None,
            message: tier.message.to_string(),
            rule: None,
        }
    }

    pub fn deny(reason: DenialReason, rule: &'static str) -> Self {
        Self {
            allowed: false,
            reason,
            message: reason.message().to_string(),
            rule: Some(rule),
        }
    }

    pub fn is_denied(&self) -> bool {
        !self.allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::USER_TIER;

    #[test]
    fn test_denial_messages() {
        assert_eq!(DenialReason::Bot.message(), "Automated requests are not allowed");
        assert_eq!(DenialReason::Shield.message(), "Request blocked by security policy");
        assert_eq!(DenialReason::RateLimit.message(), "Too many requests");
    }

    #[test]
    fn test_allow_carries_tier_message() {
        let decision = Decision::allow(&USER_TIER);
        assert!(decision.allowed);
        assert_eq!(decision.reason, DenialReason::None);
        assert_eq!(decision.message, USER_TIER.message);
    }

    #[test]
    fn test_deny() {
        let decision = Decision::deny(DenialReason::RateLimit, "user-rate-limit");
        assert!(decision.is_denied());
        assert_eq!(decision.message, "Too many requests");
        assert_eq!(decision.rule, Some("user-rate-limit"));
    }
}
