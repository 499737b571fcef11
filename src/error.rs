//! Error types.
//!
//! Two failure families exist:
//! - [`ValidationError`]: user-facing input problems, always aggregated.
//! - [`ContractViolation`]: the scheduler was handed input that validation
//!   should have rejected. These indicate a caller bug.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::validation::ValidationError;

/// Forward or backward pass, for non-convergence reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    Forward,
    Backward,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}

/// The scheduler was invoked on an activity set that is not valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("Activity '{0}' appears more than once")]
    DuplicateActivity(String),

    #[error("Activity '{activity}' references unknown predecessor '{predecessor}'")]
    UnknownPredecessor {
        activity: String,
        predecessor: String,
    },

    #[error("Cycle detected among activities: {}", .0.join(", "))]
    CycleDetected(Vec<String>),

    #[error("The {pass} pass did not converge within {iterations} iterations")]
    NonConvergence { pass: Pass, iterations: usize },
}

/// Any failure from the validate-then-schedule pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

pub type Result<T> = std::result::Result<T, PertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_violation_messages() {
        let err = ContractViolation::NonConvergence {
            pass: Pass::Backward,
            iterations: 100,
        };
        assert_eq!(
            err.to_string(),
            "The backward pass did not converge within 100 iterations"
        );

        let err = ContractViolation::CycleDetected(vec!["A".into(), "B".into()]);
        assert_eq!(err.to_string(), "Cycle detected among activities: A, B");
    }

    #[test]
    fn test_pert_error_from_contract() {
        let err: PertError = ContractViolation::DuplicateActivity("A".into()).into();
        assert!(matches!(err, PertError::Contract(_)));
        assert_eq!(err.to_string(), "Activity 'A' appears more than once");
    }
}
