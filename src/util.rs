/// Returns an [`AgentError::InvalidConfig`](crate::error::AgentError::InvalidConfig)
/// from the enclosing function if a condition on a numerical parameter does not hold
///
/// ### Example
/// ```
/// # use mab::{ensure_param, error::AgentError};
/// fn check(epsilon: f64) -> Result<(), AgentError> {
///     ensure_param!(epsilon, (0.0..=1.0).contains(&epsilon), "must be in the interval [0, 1]");
///     Ok(())
/// }
/// assert!(check(2.0).is_err());
/// ```
/// This returns an error naming `epsilon`, its value, and the reason.
#[macro_export]
macro_rules! ensure_param {
    ($var:ident, $cond:expr, $reason:literal) => {
        if !$cond {
            return Err($crate::error::AgentError::InvalidConfig {
                name: stringify!($var),
                value: $var as f64,
                reason: $reason,
            });
        }
    };
}

/// Index of the largest value, preferring the lowest index on ties
///
/// Returns 0 for an empty slice or one without any value greater than `-inf`.
pub fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &v)| {
            if v > best {
                (i, v)
            } else {
                (best_i, best)
            }
        })
        .0
}

/// All indices holding the largest value, in ascending order
pub fn argmax_all(values: &[f64]) -> Vec<usize> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect()
}
