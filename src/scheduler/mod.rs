//! PERT/CPM scheduling.
//!
//! Runs the forward/backward pass over a validated activity network and
//! derives slack, criticality, three-point estimates and project variance.
//!
//! # Strategies
//!
//! `PassStrategy::FixedPoint` repeats declaration-order sweeps until no
//! value changes (bounded by `SchedulerConfig::max_iterations`).
//! `PassStrategy::Topological` orders the network once and needs a single
//! sweep per pass. Both yield identical schedules on acyclic input.
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Malcolm et al. (1959), "Application of a Technique for Research and
//!   Development Program Evaluation"

mod config;
mod pert;

pub use crate::models::EstimatePolicy;
pub use config::{PassStrategy, SchedulerConfig};
pub use pert::{schedule, PertScheduler};
