//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Preference weight of a pooled state.
///
/// Never drops below the floor it is lowered against; has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Weight(f64);

impl Weight {
    /// Create a new weight, validating it's non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidLearningParam`] if the weight is negative or not finite.
    pub fn new(value: f64) -> Result<Self, crate::Error> {
        if value >= 0.0 && value.is_finite() {
            Ok(Weight(value))
        } else {
            Err(crate::Error::InvalidLearningParam {
                name: "weight",
                value,
                reason: "must be non-negative and finite",
            })
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Increase by `amount`.
    pub fn raise(&mut self, amount: f64) {
        self.0 += amount;
    }

    /// Decrease by `amount`, saturating at `floor`.
    ///
    /// Returns `true` if the floor was hit.
    pub fn lower(&mut self, amount: f64, floor: f64) -> bool {
        let lowered = self.0 - amount;
        if lowered <= floor {
            self.0 = floor;
            true
        } else {
            self.0 = lowered;
            false
        }
    }
}

/// The weight a state starts with under default learning parameters
impl Default for Weight {
    fn default() -> Self {
        Weight(crate::learning::LearningParams::DEFAULT_INITIAL_WEIGHT)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
