//! JWT claim structure for session tokens.

use acquisitions_models::Role;
use serde::{Deserialize, Serialize};

/// JWT claims for session tokens.
///
/// # Fields
///
/// - `id`: user id
/// - `email`: user's email address
/// - `role`: account role; decodes as `guest` when missing or unknown
/// - `exp`: expiration timestamp
/// - `iat`: issued-at timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}
