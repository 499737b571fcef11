//! PERT/CPM domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `RawRow` | Unparsed input row (grid cell text) |
//! | `Activity` | Typed activity: name, duration, predecessors |
//! | `ThreePointEstimate` | Optimistic / most likely / pessimistic durations |
//! | `ScheduleEntry` | Computed TE/TF/TL/TI/slack of one activity |
//! | `ProjectSchedule` | Complete result with critical path and variance |

mod activity;
mod estimate;
mod schedule;

pub use activity::{normalize_name, Activity, RawRow};
pub use estimate::{EstimatePolicy, ThreePointEstimate};
pub use schedule::{ConfidenceBand, ProjectSchedule, ScheduleEntry, END_NODE, START_NODE};
