use std::fmt;

use crate::tier::RateTier;

/// Key a request window is counted under: the tier plus the client identity.
///
/// Carrying the tier keeps a guest and an admin behind the same address in
/// separate windows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    tier: &'static str,
    client: String,
}

impl Fingerprint {
    pub fn new(tier: &RateTier, client: impl Into<String>) -> Self {
        Self {
            tier: tier.name,
            client: client.into(),
        }
    }

    pub fn tier(&self) -> &'static str {
        self.tier
    }

    pub fn client(&self) -> &str {
        &self.client
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tier, self.client)
    }
}
