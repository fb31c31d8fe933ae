//! Fixtures shared by agent tests
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{agent::Agent, env::Environment};

/// Bernoulli arms with fixed success probabilities
pub struct BernoulliArms {
    pub means: Vec<f64>,
}

impl BernoulliArms {
    pub fn new(means: &[f64]) -> Self {
        Self {
            means: means.to_vec(),
        }
    }

    pub fn pull<R: Rng + ?Sized>(&self, action: usize, rng: &mut R) -> f64 {
        if rng.gen_bool(self.means[action]) {
            1.0
        } else {
            0.0
        }
    }

    pub fn best_arm(&self) -> usize {
        crate::util::argmax(&self.means)
    }
}

impl Environment for BernoulliArms {
    fn num_arms(&self) -> usize {
        self.means.len()
    }
}

/// Play `rounds` rounds and return the arm pulled most often
pub fn most_pulled<A: Agent>(
    agent: &mut A,
    env: &BernoulliArms,
    rounds: usize,
    seed: u64,
) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..rounds {
        let action = agent.select_action(env, &mut rng);
        let reward = env.pull(action, &mut rng);
        agent.update(action, reward).unwrap();
    }
    let counts = agent.counts().iter().map(|&k| k as f64).collect::<Vec<_>>();
    crate::util::argmax(&counts)
}
