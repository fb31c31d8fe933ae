use rand::RngCore;

use crate::{decay::Linear, env::Environment, error::AgentError};

/// Per-arm statistics shared by every agent
///
/// Tracks how often each arm was pulled and the current value estimate Q of each arm,
/// along with the policy's exploration parameter and its annealing schedule.
/// The default learning rule is the sample average:
///
/// Q<sub>n+1</sub> = Q<sub>n</sub> + (R<sub>n</sub> - Q<sub>n</sub>) / n
///
/// where n is the number of pulls of the arm including the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmStats {
    counts: Vec<u64>,
    values: Vec<f64>,
    param: f64,
    param_init: f64,
    anneal: Linear,
    anneal_steps: u64,
}

impl ArmStats {
    /// **Errors** if `num_arms` is zero
    pub fn new(num_arms: usize, param: f64, anneal: Linear) -> Result<Self, AgentError> {
        if num_arms == 0 {
            return Err(AgentError::NoArms);
        }
        Ok(Self {
            counts: vec![0; num_arms],
            values: vec![0.0; num_arms],
            param,
            param_init: param,
            anneal,
            anneal_steps: 0,
        })
    }

    pub fn num_arms(&self) -> usize {
        self.counts.len()
    }

    /// Number of times each arm has been updated
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Current value estimate of each arm
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Current (possibly annealed) exploration parameter
    pub fn param(&self) -> f64 {
        self.param
    }

    /// Exploration parameter as it was at construction
    pub fn param_init(&self) -> f64 {
        self.param_init
    }

    pub fn anneal(&self) -> Linear {
        self.anneal
    }

    /// Total number of updates so far
    pub fn total_pulls(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn validate(&self, action: usize, reward: f64) -> Result<(), AgentError> {
        if action >= self.num_arms() {
            return Err(AgentError::ActionOutOfRange {
                action,
                num_arms: self.num_arms(),
            });
        }
        if !reward.is_finite() {
            return Err(AgentError::NonFiniteReward(reward));
        }
        Ok(())
    }

    /// Credit `reward` to `action` with the sample-average rule, then anneal the parameter
    pub fn sample_average(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        self.validate(action, reward)?;
        self.counts[action] += 1;
        let n = self.counts[action] as f64;
        let q = self.values[action];
        let mut next = q + (reward - q) / n;
        if !next.is_finite() {
            // `reward - q` overflowed; the weighted form stays within [min, max] of its inputs
            next = (q - q / n) + reward / n;
        }
        self.values[action] = next;

        if self.anneal.is_active() && self.param != 0.0 {
            self.anneal_steps += 1;
            self.param = self.anneal.evaluate(self.param_init, self.anneal_steps);
        }
        Ok(())
    }

    /// Credit `reward` to `action` by adding it to the arm's running total
    ///
    /// **Errors** with [`AgentError::EstimateOverflow`] if the total would not be finite
    pub fn accumulate(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        self.validate(action, reward)?;
        let total = self.values[action] + reward;
        if !total.is_finite() {
            return Err(AgentError::EstimateOverflow { action });
        }
        self.counts[action] += 1;
        self.values[action] = total;
        Ok(())
    }

    /// Forget every observation and restore the initial parameter
    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|k| *k = 0);
        self.values.iter_mut().for_each(|q| *q = 0.0);
        self.param = self.param_init;
        self.anneal_steps = 0;
    }
}

/// A bandit policy
///
/// Each round the caller asks for an action, obtains a reward for it from the environment,
/// then credits that reward back with [`update`](Agent::update) using the same action.
pub trait Agent {
    /// Shared per-arm statistics
    fn stats(&self) -> &ArmStats;

    /// Mutable access to the shared statistics, used by the default [`update`](Agent::update)
    fn stats_mut(&mut self) -> &mut ArmStats;

    /// Choose the arm to pull this round
    ///
    /// All randomness is drawn from `rng`, so a seeded generator makes the policy
    /// reproducible.
    fn select_action(&mut self, env: &dyn Environment, rng: &mut dyn RngCore) -> usize;

    /// Credit `reward` to `action`
    ///
    /// Defaults to the sample-average rule of [`ArmStats`].
    ///
    /// **Errors** if `action` is not a valid arm or `reward` is not finite, leaving the agent
    /// unchanged
    fn update(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        self.stats_mut().sample_average(action, reward)
    }

    /// Return to the freshly constructed state
    fn reset(&mut self);

    /// Number of arms
    fn num_arms(&self) -> usize {
        self.stats().num_arms()
    }

    /// Number of times each arm has been updated
    fn counts(&self) -> &[u64] {
        self.stats().counts()
    }

    /// Current value estimate of each arm
    fn values(&self) -> &[f64] {
        self.stats().values()
    }

    /// Current (possibly annealed) exploration parameter
    fn param(&self) -> f64 {
        self.stats().param()
    }

    /// Exploration parameter as it was at construction
    fn param_init(&self) -> f64 {
        self.stats().param_init()
    }

    /// Total number of updates so far
    fn total_pulls(&self) -> u64 {
        self.stats().total_pulls()
    }
}
