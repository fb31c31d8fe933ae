//! Agents for the stochastic multi-armed bandit problem.
//!
//! Every agent implements [`Agent`]: each round, ask it for an arm with
//! [`Agent::select_action`], pull that arm yourself, then hand the reward back with
//! [`Agent::update`]. Randomness comes from the caller's generator, so seeding it makes
//! a run reproducible.

/// Bandit policies
pub mod algo;

/// Agent contract and shared per-arm statistics
pub mod agent;

/// Annealing of exploration parameters
pub mod decay;

/// Environment
pub mod env;

/// Errors
pub mod error;

/// Helpers
pub mod util;

#[cfg(test)]
mod testing;

pub use agent::{Agent, ArmStats};
pub use algo::{
    EpsilonGreedyAgent, EpsilonGreedyAgentConfig, Exp3Agent, Exp3AgentConfig, ExploreCommitAgent,
    ExploreCommitAgentConfig, FplAgent, FplAgentConfig, UcbAgent, UcbAgentConfig,
};
pub use env::Environment;
pub use error::AgentError;
