use rand::RngCore;

use crate::{
    agent::{Agent, ArmStats},
    decay::Linear,
    ensure_param,
    env::Environment,
    error::AgentError,
    util::argmax,
};

/// Configuration for the [`UcbAgent`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UcbAgentConfig {
    /// Multiplier on the confidence radius; higher means more exploration
    ///
    /// **Default**: `1.0`
    pub c: f64,
    /// Amount subtracted from c after every update, floored at zero
    ///
    /// **Default**: `0.0`
    pub anneal: f64,
}

impl Default for UcbAgentConfig {
    fn default() -> Self {
        Self { c: 1.0, anneal: 0.0 }
    }
}

/// Upper confidence bound agent
///
/// Pulls every arm once, then the arm maximizing
///
/// Q<sub>a</sub> + c √(2 ln f(t) / k<sub>a</sub>), with f(t) = 1 + t ln<sup>2</sup>(t)
///
/// where t is the number of rounds so far and k<sub>a</sub> the pulls of arm a.
#[derive(Debug, Clone, PartialEq)]
pub struct UcbAgent {
    stats: ArmStats,
}

impl UcbAgent {
    pub fn new(env: &dyn Environment, config: UcbAgentConfig) -> Result<Self, AgentError> {
        let UcbAgentConfig { c, anneal } = config;
        ensure_param!(c, c.is_finite() && c > 0.0, "must be finite and positive");
        let stats = ArmStats::new(env.num_arms(), c, Linear::new(anneal)?)?;
        log::debug!(
            "ucb agent over {} arms (c={c}, anneal={anneal})",
            stats.num_arms()
        );
        Ok(Self { stats })
    }

    /// Current c
    pub fn c(&self) -> f64 {
        self.stats.param()
    }

    /// Upper confidence bound of each arm at the current round
    ///
    /// Arms that were never pulled have an infinite bound.
    pub fn bounds(&self) -> Vec<f64> {
        let t = self.stats.total_pulls() as f64;
        let log_f = (1.0 + t * t.ln().powi(2)).ln();
        let c = self.stats.param();
        self.stats
            .values()
            .iter()
            .zip(self.stats.counts())
            .map(|(&q, &k)| {
                if k == 0 {
                    return f64::INFINITY;
                }
                q + c * (2.0 * log_f / k as f64).sqrt()
            })
            .collect()
    }
}

impl Agent for UcbAgent {
    fn stats(&self) -> &ArmStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut ArmStats {
        &mut self.stats
    }

    fn select_action(&mut self, env: &dyn Environment, _rng: &mut dyn RngCore) -> usize {
        debug_assert_eq!(env.num_arms(), self.stats.num_arms());
        let t = self.stats.total_pulls();
        if t < self.stats.num_arms() as u64 {
            return t as usize;
        }
        argmax(&self.bounds())
    }

    fn reset(&mut self) {
        self.stats.reset();
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::testing::{most_pulled, BernoulliArms};

    #[test]
    fn config_is_validated() {
        for c in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(UcbAgent::new(&2usize, UcbAgentConfig { c, anneal: 0.0 }).is_err());
        }
        assert!(UcbAgent::new(&2usize, UcbAgentConfig { c: 1.0, anneal: -0.5 }).is_err());
        assert_eq!(
            UcbAgent::new(&2usize, UcbAgentConfig::default()).unwrap().c(),
            1.0
        );
    }

    #[test]
    fn warm_up_pulls_each_arm() {
        let mut agent = UcbAgent::new(&4usize, UcbAgentConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let rewards = [5.0, -3.0, 100.0, 0.0];
        for (expected, reward) in rewards.into_iter().enumerate() {
            let action = agent.select_action(&4usize, &mut rng);
            assert_eq!(action, expected);
            agent.update(action, reward).unwrap();
        }
        assert_eq!(agent.counts(), &[1, 1, 1, 1]);
        assert_eq!(agent.select_action(&4usize, &mut rng), 2);
    }

    #[test]
    fn prefers_less_pulled_arm_on_equal_estimates() {
        let mut agent = UcbAgent::new(&2usize, UcbAgentConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..3 {
            agent.update(0, 0.5).unwrap();
        }
        agent.update(1, 0.5).unwrap();
        let bounds = agent.bounds();
        assert!(bounds[1] > bounds[0]);
        assert_eq!(agent.select_action(&2usize, &mut rng), 1);
    }

    #[test]
    fn bound_formula() {
        let config = UcbAgentConfig {
            c: 2.0,
            ..Default::default()
        };
        let mut agent = UcbAgent::new(&2usize, config).unwrap();
        agent.update(0, 1.0).unwrap();
        agent.update(1, 0.0).unwrap();
        agent.update(1, 1.0).unwrap();

        let t = 3.0f64;
        let log_f = (1.0 + t * t.ln().powi(2)).ln();
        let bounds = agent.bounds();
        assert!((bounds[0] - (1.0 + 2.0 * (2.0 * log_f).sqrt())).abs() < 1e-12);
        assert!((bounds[1] - (0.5 + 2.0 * log_f.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn c_anneals_to_zero() {
        let config = UcbAgentConfig { c: 1.0, anneal: 0.1 };
        let mut agent = UcbAgent::new(&2usize, config).unwrap();
        for i in 0..10 {
            assert!(agent.c() > 0.0);
            agent.update(i % 2, 0.5).unwrap();
        }
        assert_eq!(agent.c(), 0.0);
        agent.update(0, 0.5).unwrap();
        assert_eq!(agent.c(), 0.0);
        assert_eq!(agent.param_init(), 1.0);

        // with no confidence radius left the bound is the estimate
        assert_eq!(agent.bounds(), vec![0.5, 0.5]);

        agent.reset();
        assert_eq!(agent.c(), 1.0);
    }

    #[test]
    fn finds_best_arm() {
        let env = BernoulliArms::new(&[0.2, 0.8, 0.5]);
        let mut agent = UcbAgent::new(&env, UcbAgentConfig::default()).unwrap();
        assert_eq!(most_pulled(&mut agent, &env, 2000, 19), env.best_arm());
    }
}
