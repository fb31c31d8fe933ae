use rand::{
    distributions::{Distribution, WeightedIndex},
    RngCore,
};

use crate::{
    agent::{Agent, ArmStats},
    decay::Linear,
    ensure_param,
    env::Environment,
    error::AgentError,
    util::argmax,
};

/// Lowest log-weight relative to the heaviest arm
const LOG_WEIGHT_FLOOR: f64 = -700.0;

/// Largest change to a log-weight in one update
///
/// Any step this large already moves an arm from the floor to the top (or back), so clamping
/// to it gives the same weights as the unclamped step after normalization.
const MAX_LOG_STEP: f64 = -2.0 * LOG_WEIGHT_FLOOR;

/// Configuration for the [`Exp3Agent`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exp3AgentConfig {
    /// Weight of the uniform distribution mixed into the action probabilities, in `[0, 1]`
    ///
    /// **Default**: `0.1`
    pub gamma: f64,
    /// Amount subtracted from gamma after every update, floored at zero
    ///
    /// **Default**: `0.0`
    pub anneal: f64,
}

impl Default for Exp3AgentConfig {
    fn default() -> Self {
        Self {
            gamma: 0.1,
            anneal: 0.0,
        }
    }
}

/// Exponential-weight algorithm for exploration and exploitation
///
/// Samples arms from
///
/// p<sub>a</sub> = (1 - γ) w<sub>a</sub> / Σw + γ / N
///
/// and after each reward multiplies the pulled arm's weight by exp(γ r / (p<sub>a</sub> N)).
///
/// Weights are stored as logarithms shifted so the heaviest arm sits at zero, which leaves
/// the probabilities unchanged while keeping the weights from overflowing. Arms more than
/// e<sup>700</sup> times lighter than the heaviest are clamped at that ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Exp3Agent {
    stats: ArmStats,
    log_weights: Vec<f64>,
    probabilities: Vec<f64>,
}

impl Exp3Agent {
    pub fn new(env: &dyn Environment, config: Exp3AgentConfig) -> Result<Self, AgentError> {
        let Exp3AgentConfig { gamma, anneal } = config;
        ensure_param!(
            gamma,
            (0.0..=1.0).contains(&gamma),
            "must be in the interval [0, 1]"
        );
        let stats = ArmStats::new(env.num_arms(), gamma, Linear::new(anneal)?)?;
        let n = stats.num_arms();
        log::debug!("exp3 agent over {n} arms (gamma={gamma}, anneal={anneal})");
        Ok(Self {
            stats,
            log_weights: vec![0.0; n],
            probabilities: vec![1.0 / n as f64; n],
        })
    }

    /// Current gamma
    pub fn gamma(&self) -> f64 {
        self.stats.param()
    }

    /// Arm weights relative to the heaviest arm
    pub fn weights(&self) -> Vec<f64> {
        self.log_weights.iter().map(|w| w.exp()).collect()
    }

    /// Action probabilities as of the last selection
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    fn recompute_probabilities(&mut self) {
        let gamma = self.stats.param();
        let n = self.stats.num_arms() as f64;
        let max = self
            .log_weights
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let total: f64 = self.log_weights.iter().map(|w| (w - max).exp()).sum();
        for (p, w) in self.probabilities.iter_mut().zip(&self.log_weights) {
            *p = (1.0 - gamma) * (w - max).exp() / total + gamma / n;
        }
    }

    fn normalize_log_weights(&mut self) {
        let max = self
            .log_weights
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let mut clamped = 0;
        for w in self.log_weights.iter_mut() {
            *w -= max;
            if !(*w >= LOG_WEIGHT_FLOOR) {
                *w = LOG_WEIGHT_FLOOR;
                clamped += 1;
            }
        }
        if clamped > 0 {
            log::trace!("exp3: clamped {clamped} arm weights at the floor");
        }
    }
}

impl Agent for Exp3Agent {
    fn stats(&self) -> &ArmStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut ArmStats {
        &mut self.stats
    }

    fn select_action(&mut self, env: &dyn Environment, rng: &mut dyn RngCore) -> usize {
        debug_assert_eq!(env.num_arms(), self.stats.num_arms());
        self.recompute_probabilities();
        match WeightedIndex::new(&self.probabilities) {
            Ok(dist) => dist.sample(rng),
            Err(err) => {
                log::warn!(
                    "exp3: cannot sample {:?} ({err}), taking heaviest arm",
                    self.probabilities
                );
                argmax(&self.log_weights)
            }
        }
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        self.stats.sample_average(action, reward)?;
        let gamma = self.stats.param();
        if gamma == 0.0 {
            return Ok(());
        }
        let n = self.stats.num_arms() as f64;
        let step = gamma * reward / (self.probabilities[action] * n);
        self.log_weights[action] += step.clamp(-MAX_LOG_STEP, MAX_LOG_STEP);
        self.normalize_log_weights();
        Ok(())
    }

    fn reset(&mut self) {
        self.stats.reset();
        let n = self.stats.num_arms();
        self.log_weights.iter_mut().for_each(|w| *w = 0.0);
        self.probabilities.iter_mut().for_each(|p| *p = 1.0 / n as f64);
    }
}
