use rand::{seq::SliceRandom, Rng, RngCore};

use crate::{
    agent::{Agent, ArmStats},
    decay::Linear,
    ensure_param,
    env::Environment,
    error::AgentError,
    util::argmax_all,
};

/// Configuration for the [`EpsilonGreedyAgent`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedyAgentConfig {
    /// Probability of pulling a uniformly random arm, in `[0, 1]`
    ///
    /// **Default**: `0.1`
    pub epsilon: f64,
    /// Amount subtracted from epsilon after every update, floored at zero
    ///
    /// **Default**: `0.0`
    pub anneal: f64,
}

impl Default for EpsilonGreedyAgentConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            anneal: 0.0,
        }
    }
}

/// Pulls a random arm with probability epsilon and the best estimated arm otherwise
///
/// Ties between best arms are broken uniformly at random.
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonGreedyAgent {
    stats: ArmStats,
}

impl EpsilonGreedyAgent {
    pub fn new(
        env: &dyn Environment,
        config: EpsilonGreedyAgentConfig,
    ) -> Result<Self, AgentError> {
        let EpsilonGreedyAgentConfig { epsilon, anneal } = config;
        ensure_param!(
            epsilon,
            (0.0..=1.0).contains(&epsilon),
            "must be in the interval [0, 1]"
        );
        let stats = ArmStats::new(env.num_arms(), epsilon, Linear::new(anneal)?)?;
        log::debug!(
            "epsilon-greedy agent over {} arms (epsilon={epsilon}, anneal={anneal})",
            stats.num_arms()
        );
        Ok(Self { stats })
    }

    /// Current epsilon
    pub fn epsilon(&self) -> f64 {
        self.stats.param()
    }

    /// Choose an arm, exploring unconditionally if `force_explore` is set
    pub fn select_action_with(
        &mut self,
        env: &dyn Environment,
        rng: &mut dyn RngCore,
        force_explore: bool,
    ) -> usize {
        debug_assert_eq!(env.num_arms(), self.stats.num_arms());
        let explore = rng.gen::<f64>() < self.stats.param() || force_explore;
        if explore {
            return rng.gen_range(0..self.stats.num_arms());
        }
        match argmax_all(self.stats.values()).choose(rng).copied() {
            Some(action) => action,
            None => rng.gen_range(0..self.stats.num_arms()),
        }
    }
}

impl Agent for EpsilonGreedyAgent {
    fn stats(&self) -> &ArmStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut ArmStats {
        &mut self.stats
    }

    fn select_action(&mut self, env: &dyn Environment, rng: &mut dyn RngCore) -> usize {
        self.select_action_with(env, rng, false)
    }

    fn reset(&mut self) {
        self.stats.reset();
    }
}
