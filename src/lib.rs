//! PERT/CPM project scheduling for the U-Engine ecosystem.
//!
//! Validates a small activity network and computes its forward/backward
//! pass schedule: early and late times, slack, the critical path, and
//! three-point (PERT) estimate statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `RawRow`, `Activity`, `ThreePointEstimate`,
//!   `ScheduleEntry`, `ProjectSchedule`
//! - **`validation`**: Input integrity checks (duplicates, self-reference,
//!   unknown predecessors, DAG cycles)
//! - **`scheduler`**: Forward/backward pass, critical path, project variance
//! - **`network`**: Arrows and node levels for diagram renderers
//! - **`import`**: Header matching for spreadsheet-like tables
//! - **`report`**: Plain-text results tables
//!
//! # Pipeline
//!
//! ```
//! use u_pert::models::RawRow;
//! use u_pert::scheduler::SchedulerConfig;
//!
//! let rows = vec![
//!     RawRow::new("a", "3", ""),
//!     RawRow::new("b", "2", "a"),
//!     RawRow::new("c", "4", "a"),
//!     RawRow::new("d", "1", "b, c"),
//! ];
//! let schedule = u_pert::plan(&rows, &SchedulerConfig::default()).unwrap();
//! assert_eq!(schedule.critical_path(), ["A", "C", "D"]);
//! ```
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Malcolm et al. (1959), "Application of a Technique for Research and
//!   Development Program Evaluation"

pub mod error;
pub mod import;
pub mod models;
pub mod network;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{ContractViolation, PertError, Result};
pub use models::{Activity, ProjectSchedule, RawRow, ScheduleEntry};
pub use scheduler::{PertScheduler, SchedulerConfig};

/// Validates raw rows and schedules the resulting network.
pub fn plan(rows: &[RawRow], config: &SchedulerConfig) -> Result<ProjectSchedule> {
    let activities = validation::validate(rows)?;
    let schedule = PertScheduler::with_config(config.clone()).schedule(&activities)?;
    Ok(schedule)
}
