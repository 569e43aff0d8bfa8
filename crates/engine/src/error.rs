use thiserror::Error;

use crate::payment::PaymentStatus;

/// Errors surfaced by the engine.
///
/// The calculators themselves never fail; only configuration loading and
/// explicit milestone status updates can.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (rate out of range, percentages not summing to 100, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// No milestone with this id exists in the schedule.
    #[error("unknown milestone: {0}")]
    UnknownMilestone(String),
    /// Status change not permitted by the milestone lifecycle.
    #[error("milestone '{id}': cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: PaymentStatus,
        to: PaymentStatus,
    },
}
