//! Three-point (PERT) duration estimates.
//!
//! Classic PERT describes each activity by an optimistic (o), most likely (m)
//! and pessimistic (p) duration. Here the three values are synthesized from
//! the single deterministic duration using an [`EstimatePolicy`].
//!
//! ```text
//! σ  = (p - o) / 6
//! σ² = variance
//! te = (o + 4m + p) / 6
//! ```
//!
//! # Reference
//! Malcolm et al. (1959), "Application of a Technique for Research and
//! Development Program Evaluation", Operations Research 7(5)

use serde::{Deserialize, Serialize};

/// Constants used to synthesize three-point estimates from one duration.
///
/// ```text
/// optimistic  = max(optimistic_floor, duration - optimistic_offset)
/// most_likely = duration
/// pessimistic = duration + pessimistic_offset
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatePolicy {
    pub optimistic_offset: f64,
    pub optimistic_floor: f64,
    pub pessimistic_offset: f64,
}

impl Default for EstimatePolicy {
    fn default() -> Self {
        Self {
            optimistic_offset: 1.0,
            optimistic_floor: 1.0,
            pessimistic_offset: 2.0,
        }
    }
}

/// Three-point estimate of one activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreePointEstimate {
    pub optimistic: f64,
    pub most_likely: f64,
    pub pessimistic: f64,
    pub standard_deviation: f64,
    pub variance: f64,
}

impl ThreePointEstimate {
    /// Builds an estimate from explicit o/m/p values.
    pub fn new(optimistic: f64, most_likely: f64, pessimistic: f64) -> Self {
        let standard_deviation = (pessimistic - optimistic) / 6.0;
        Self {
            optimistic,
            most_likely,
            pessimistic,
            standard_deviation,
            variance: standard_deviation * standard_deviation,
        }
    }

    /// Synthesizes an estimate from a single duration.
    pub fn from_duration(duration: f64, policy: &EstimatePolicy) -> Self {
        let optimistic = (duration - policy.optimistic_offset).max(policy.optimistic_floor);
        let pessimistic = duration + policy.pessimistic_offset;
        Self::new(optimistic, duration, pessimistic)
    }

    /// All-zero estimate, used for the START/END boundary nodes.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Beta-weighted expected duration `(o + 4m + p) / 6`.
    pub fn expected(&self) -> f64 {
        (self.optimistic + 4.0 * self.most_likely + self.pessimistic) / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_duration_five() {
        let est = ThreePointEstimate::from_duration(5.0, &EstimatePolicy::default());
        assert!((est.optimistic - 4.0).abs() < 1e-10);
        assert!((est.most_likely - 5.0).abs() < 1e-10);
        assert!((est.pessimistic - 7.0).abs() < 1e-10);
        assert!((est.standard_deviation - 0.5).abs() < 1e-10);
        assert!((est.variance - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_optimistic_floor() {
        // max(1, 1 - 1) = 1
        let est = ThreePointEstimate::from_duration(1.0, &EstimatePolicy::default());
        assert!((est.optimistic - 1.0).abs() < 1e-10);

        // Milestone: optimistic floor still applies.
        let est = ThreePointEstimate::from_duration(0.0, &EstimatePolicy::default());
        assert!((est.optimistic - 1.0).abs() < 1e-10);
        assert!((est.pessimistic - 2.0).abs() < 1e-10);
        assert!((est.standard_deviation - 1.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_custom_policy() {
        let policy = EstimatePolicy {
            optimistic_offset: 2.0,
            optimistic_floor: 0.0,
            pessimistic_offset: 4.0,
        };
        let est = ThreePointEstimate::from_duration(6.0, &policy);
        assert!((est.optimistic - 4.0).abs() < 1e-10);
        assert!((est.pessimistic - 10.0).abs() < 1e-10);
        assert!((est.standard_deviation - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_expected() {
        let est = ThreePointEstimate::new(2.0, 4.0, 12.0);
        // (2 + 16 + 12) / 6 = 5
        assert!((est.expected() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero() {
        let est = ThreePointEstimate::zero();
        assert!((est.variance - 0.0).abs() < 1e-10);
        assert!((est.expected() - 0.0).abs() < 1e-10);
    }
}
