use std::time::Duration;

use thiserror::Error;

/// Failure of the decision machinery itself, as opposed to a denial.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("policy evaluation timed out after {0:?}")]
    Timeout(Duration),

    #[error("policy backend unavailable: {0}")]
    Backend(String),
}
