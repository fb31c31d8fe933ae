use rand::RngCore;
use rand_distr::{Distribution, Exp};

use crate::{
    agent::{Agent, ArmStats},
    decay::Linear,
    ensure_param,
    env::Environment,
    error::AgentError,
    util::argmax,
};

/// Configuration for the [`FplAgent`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FplAgentConfig {
    /// Rate of the exponential noise, whose mean is `1 / lambda`
    ///
    /// **Default**: `1.0`
    pub lambda: f64,
}

impl Default for FplAgentConfig {
    fn default() -> Self {
        Self { lambda: 1.0 }
    }
}

/// Follow-the-perturbed-leader agent
///
/// Tracks the cumulative reward of each arm (not the average) and pulls the arm whose total,
/// plus fresh exponential noise, is largest.
#[derive(Debug, Clone)]
pub struct FplAgent {
    stats: ArmStats,
    noise: Vec<f64>,
    dist: Exp<f64>,
}

impl FplAgent {
    pub fn new(env: &dyn Environment, config: FplAgentConfig) -> Result<Self, AgentError> {
        let FplAgentConfig { lambda } = config;
        ensure_param!(
            lambda,
            lambda.is_finite() && lambda > 0.0,
            "must be finite and positive"
        );
        let dist = Exp::new(lambda).map_err(|_| AgentError::InvalidConfig {
            name: "lambda",
            value: lambda,
            reason: "must be finite and positive",
        })?;
        let stats = ArmStats::new(env.num_arms(), lambda, Linear::none())?;
        let n = stats.num_arms();
        log::debug!("fpl agent over {n} arms (lambda={lambda})");
        Ok(Self {
            stats,
            noise: vec![0.0; n],
            dist,
        })
    }

    pub fn lambda(&self) -> f64 {
        self.stats.param()
    }

    /// Noise drawn at the last selection
    pub fn noise(&self) -> &[f64] {
        &self.noise
    }
}

impl Agent for FplAgent {
    fn stats(&self) -> &ArmStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut ArmStats {
        &mut self.stats
    }

    fn select_action(&mut self, env: &dyn Environment, rng: &mut dyn RngCore) -> usize {
        debug_assert_eq!(env.num_arms(), self.stats.num_arms());
        for z in self.noise.iter_mut() {
            *z = self.dist.sample(rng);
        }
        let perturbed = self
            .stats
            .values()
            .iter()
            .zip(&self.noise)
            .map(|(q, z)| q + z)
            .collect::<Vec<_>>();
        argmax(&perturbed)
    }

    /// Adds `reward` to the arm's cumulative total
    fn update(&mut self, action: usize, reward: f64) -> Result<(), AgentError> {
        self.stats.accumulate(action, reward)
    }

    fn reset(&mut self) {
        self.stats.reset();
        self.noise.iter_mut().for_each(|z| *z = 0.0);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::testing::{most_pulled, BernoulliArms};

    #[test]
    fn config_is_validated() {
        for lambda in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            assert!(FplAgent::new(&2usize, FplAgentConfig { lambda }).is_err());
        }
        assert!(FplAgent::new(&2usize, FplAgentConfig::default()).is_ok());
    }

    #[test]
    fn update_accumulates_rewards() {
        let mut agent = FplAgent::new(&3usize, FplAgentConfig::default()).unwrap();
        for r in [1.0, 0.5, 2.0, 0.25] {
            agent.update(1, r).unwrap();
        }
        assert_eq!(agent.values(), &[0.0, 3.75, 0.0]);
        assert_eq!(agent.counts(), &[0, 4, 0]);
        assert!(agent.update(3, 1.0).is_err());
    }

    #[test]
    fn noise_is_resampled() {
        let mut agent = FplAgent::new(&4usize, FplAgentConfig { lambda: 2.0 }).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        agent.select_action(&4usize, &mut rng);
        let first = agent.noise().to_vec();
        assert!(first.iter().all(|&z| z >= 0.0));
        agent.select_action(&4usize, &mut rng);
        assert_ne!(agent.noise(), first.as_slice());
    }

    #[test]
    fn picks_perturbed_leader() {
        let mut agent = FplAgent::new(&3usize, FplAgentConfig { lambda: 1.0 }).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        agent.update(2, 1e6).unwrap();
        for _ in 0..50 {
            let action = agent.select_action(&3usize, &mut rng);
            assert_eq!(action, 2);
            let perturbed = |a: usize| agent.values()[a] + agent.noise()[a];
            assert!(perturbed(2) >= perturbed(0) && perturbed(2) >= perturbed(1));
        }
    }

    #[test]
    fn finds_best_arm() {
        let env = BernoulliArms::new(&[0.2, 0.8, 0.5]);
        let mut agent = FplAgent::new(&env, FplAgentConfig::default()).unwrap();
        assert_eq!(most_pulled(&mut agent, &env, 2000, 17), env.best_arm());
    }
}
