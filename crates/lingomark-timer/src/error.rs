//! Timer configuration errors.

use thiserror::Error;

/// Invalid warning threshold configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    /// A threshold of zero would fire together with expiry.
    #[error("warning thresholds must be greater than zero")]
    Zero,

    /// The final warning must come after the early one.
    #[error(
        "one-minute warning ({one_minute}s) must be below the five-minute warning ({five_minute}s)"
    )]
    Misordered { five_minute: u64, one_minute: u64 },
}
