//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::models::EstimatePolicy;

/// How the forward and backward passes traverse the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStrategy {
    /// Repeated sweeps in declaration order until no value changes.
    /// Bounded by [`SchedulerConfig::max_iterations`].
    #[default]
    FixedPoint,
    /// One sweep in topological order (Kahn). Ignores the iteration cap.
    Topological,
}

/// PERT/CPM scheduler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Sweep limit per fixed-point pass. Raised to the activity count + 1
    /// when lower, so acyclic networks always converge.
    pub max_iterations: usize,
    /// Activities with |slack| below this are critical.
    pub critical_tolerance: f64,
    /// Pass traversal strategy.
    pub strategy: PassStrategy,
    /// Three-point estimate synthesis.
    pub estimate: EstimatePolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            critical_tolerance: 1e-4,
            strategy: PassStrategy::default(),
            estimate: EstimatePolicy::default(),
        }
    }
}

impl SchedulerConfig {
    /// Sets the fixed-point iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the criticality tolerance.
    pub fn with_critical_tolerance(mut self, tolerance: f64) -> Self {
        self.critical_tolerance = tolerance;
        self
    }

    /// Sets the pass strategy.
    pub fn with_strategy(mut self, strategy: PassStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the three-point estimate policy.
    pub fn with_estimate_policy(mut self, policy: EstimatePolicy) -> Self {
        self.estimate = policy;
        self
    }
}
