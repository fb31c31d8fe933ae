//! Agent errors
use thiserror::Error;

/// Error constructing or updating an agent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("environment must have at least one arm")]
    NoArms,
    #[error("invalid value {value} for `{name}`: {reason}")]
    InvalidConfig {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("action {action} is out of range for {num_arms} arms")]
    ActionOutOfRange { action: usize, num_arms: usize },
    #[error("reward must be finite, got {0}")]
    NonFiniteReward(f64),
    #[error("estimate of arm {action} would overflow")]
    EstimateOverflow { action: usize },
}
