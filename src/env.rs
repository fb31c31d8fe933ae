/// The bandit an agent plays against.
///
/// Reward generation and the round loop belong to the caller; agents only need
/// to know how many arms there are. Arms are identified by their index in
/// `0..num_arms()`.
pub trait Environment {
    /// Number of arms available each round
    ///
    /// Must not change over the lifetime of an agent built from this environment.
    fn num_arms(&self) -> usize;
}

impl Environment for usize {
    fn num_arms(&self) -> usize {
        *self
    }
}
