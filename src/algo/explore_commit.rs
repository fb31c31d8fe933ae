use rand::RngCore;

use crate::{
    agent::{Agent, ArmStats},
    decay::Linear,
    ensure_param,
    env::Environment,
    error::AgentError,
    util::argmax,
};

/// Configuration for the [`ExploreCommitAgent`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExploreCommitAgentConfig {
    /// Number of exploration pulls of each arm before committing, must be positive
    ///
    /// **Default**: `10`
    pub rounds_per_arm: u32,
}

impl Default for ExploreCommitAgentConfig {
    fn default() -> Self {
        Self { rounds_per_arm: 10 }
    }
}

/// Explore-then-commit agent
///
/// Pulls the arms round-robin `m` times each, then commits to the arm with the best
/// sample average and pulls it for the rest of the experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreCommitAgent {
    stats: ArmStats,
    rounds_per_arm: u32,
    committed: Option<usize>,
}

impl ExploreCommitAgent {
    pub fn new(
        env: &dyn Environment,
        config: ExploreCommitAgentConfig,
    ) -> Result<Self, AgentError> {
        let ExploreCommitAgentConfig { rounds_per_arm } = config;
        ensure_param!(rounds_per_arm, rounds_per_arm > 0, "must be positive");
        let stats = ArmStats::new(env.num_arms(), rounds_per_arm as f64, Linear::none())?;
        log::debug!(
            "explore-then-commit agent over {} arms (m={rounds_per_arm})",
            stats.num_arms()
        );
        Ok(Self {
            stats,
            rounds_per_arm,
            committed: None,
        })
    }

    pub fn rounds_per_arm(&self) -> u32 {
        self.rounds_per_arm
    }

    /// Total number of exploration rounds, m·N
    pub fn exploration_rounds(&self) -> u64 {
        self.rounds_per_arm as u64 * self.stats.num_arms() as u64
    }

    /// The arm committed to, once exploration is over
    pub fn committed_action(&self) -> Option<usize> {
        self.committed
    }
}

impl Agent for ExploreCommitAgent {
    fn stats(&self) -> &ArmStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut ArmStats {
        &mut self.stats
    }

    fn select_action(&mut self, env: &dyn Environment, _rng: &mut dyn RngCore) -> usize {
        debug_assert_eq!(env.num_arms(), self.stats.num_arms());
        if let Some(action) = self.committed {
            return action;
        }

        let t = self.stats.total_pulls();
        if t < self.exploration_rounds() {
            return (t % self.stats.num_arms() as u64) as usize;
        }

        let action = argmax(self.stats.values());
        log::debug!(
            "committing to arm {action} after {t} rounds (estimate {})",
            self.stats.values()[action]
        );
        self.committed = Some(action);
        action
    }

    fn reset(&mut self) {
        self.stats.reset();
        self.committed = None;
    }
}
