use crate::{ensure_param, error::AgentError};

/// Linear annealing of an exploration parameter
///
/// v(n) = max(v<sub>0</sub> - rn, 0)
///
/// where n counts annealing steps, one per update. A rate of zero disables annealing.
/// Remainders within rounding error of zero are snapped to zero, so a value reaches
/// exactly 0 after ceil(v<sub>0</sub> / r) steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Linear {
    rate: f64,
}

impl Linear {
    /// **Errors** if `rate` is negative or not finite
    pub fn new(rate: f64) -> Result<Self, AgentError> {
        ensure_param!(
            rate,
            rate.is_finite() && rate >= 0.0,
            "must be finite and non-negative"
        );
        Ok(Self { rate })
    }

    /// A schedule that leaves the value untouched
    pub fn none() -> Self {
        Self { rate: 0.0 }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn is_active(&self) -> bool {
        self.rate != 0.0
    }

    /// Value after `steps` steps from `vi`
    pub fn evaluate(&self, vi: f64, steps: u64) -> f64 {
        let v = vi - self.rate * steps as f64;
        if v <= 4.0 * f64::EPSILON * vi.abs() {
            0.0
        } else {
            v
        }
    }
}
