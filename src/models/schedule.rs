//! Schedule (result) model.
//!
//! A [`ProjectSchedule`] is the immutable outcome of one scheduling run: one
//! [`ScheduleEntry`] per activity, the synthetic START/END boundary nodes,
//! the critical path and project-level statistics.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ThreePointEstimate;

/// Name of the synthetic node preceding every initial activity.
pub const START_NODE: &str = "START";
/// Name of the synthetic node following every final activity.
pub const END_NODE: &str = "END";

/// Computed timing of one activity.
///
/// Naming follows the forward/backward pass notation:
///
/// | Field | Notation | Meaning |
/// |-------|----------|---------|
/// | `early_start` | TE | earliest start |
/// | `early_finish` | TF | TE + duration |
/// | `late_finish` | TL | latest finish without delaying the project |
/// | `late_start` | TI | TL − duration |
/// | `slack` | | TI − TE |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub name: String,
    pub duration: f64,
    pub predecessors: Vec<String>,
    pub early_start: f64,
    pub early_finish: f64,
    pub late_finish: f64,
    pub late_start: f64,
    pub slack: f64,
    pub is_critical: bool,
    #[serde(flatten)]
    pub estimate: ThreePointEstimate,
}

impl ScheduleEntry {
    /// A zero-duration boundary node pinned at `time`.
    pub fn boundary(name: impl Into<String>, time: f64) -> Self {
        Self {
            name: name.into(),
            duration: 0.0,
            predecessors: Vec::new(),
            early_start: time,
            early_finish: time,
            late_finish: time,
            late_start: time,
            slack: 0.0,
            is_critical: true,
            estimate: ThreePointEstimate::zero(),
        }
    }

    /// Whether this entry is a milestone (zero duration).
    #[inline]
    pub fn is_milestone(&self) -> bool {
        self.duration == 0.0
    }
}

/// Project completion range at ±k standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// Number of standard deviations (1, 2 or 3).
    pub sigmas: u8,
    /// Normal-distribution coverage of the band (0.68, 0.95, 0.997).
    pub coverage: f64,
    pub lower: f64,
    pub upper: f64,
}

/// The complete result of a PERT/CPM run. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSchedule {
    entries: Vec<ScheduleEntry>,
    start: ScheduleEntry,
    end: ScheduleEntry,
    project_duration: f64,
    critical_path: Vec<String>,
    project_variance: f64,
    project_standard_deviation: f64,
}

const BAND_COVERAGE: [(u8, f64); 3] = [(1, 0.68), (2, 0.95), (3, 0.997)];

impl ProjectSchedule {
    /// Assembles a schedule from computed entries (in input order).
    ///
    /// Derives the boundary nodes, critical path and project variance.
    pub(crate) fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        let project_duration = entries
            .iter()
            .map(|e| e.early_finish)
            .fold(0.0_f64, f64::max);

        let mut critical: Vec<&ScheduleEntry> = entries.iter().filter(|e| e.is_critical).collect();
        // Stable: ties keep input order.
        critical.sort_by(|a, b| a.early_start.total_cmp(&b.early_start));
        let critical_path: Vec<String> = critical.iter().map(|e| e.name.clone()).collect();

        let project_variance: f64 = critical.iter().map(|e| e.estimate.variance).sum();

        Self {
            start: ScheduleEntry::boundary(START_NODE, 0.0),
            end: ScheduleEntry::boundary(END_NODE, project_duration),
            entries,
            project_duration,
            critical_path,
            project_variance,
            project_standard_deviation: project_variance.sqrt(),
        }
    }

    /// Activity entries in input order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Looks up an activity entry by name.
    pub fn entry(&self, name: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Name-keyed view of all activity entries.
    pub fn by_name(&self) -> HashMap<&str, &ScheduleEntry> {
        self.entries.iter().map(|e| (e.name.as_str(), e)).collect()
    }

    /// The synthetic START node.
    pub fn start(&self) -> &ScheduleEntry {
        &self.start
    }

    /// The synthetic END node.
    pub fn end(&self) -> &ScheduleEntry {
        &self.end
    }

    /// Activities that list `name` as a predecessor.
    pub fn successors(&self, name: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.predecessors.iter().any(|p| p == name))
            .collect()
    }

    /// Whether any activity lists `name` as a predecessor.
    pub fn has_successors(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.predecessors.iter().any(|p| p == name))
    }

    /// Maximum early finish over all activities (0 when empty).
    pub fn project_duration(&self) -> f64 {
        self.project_duration
    }

    /// Critical activities ordered by early start.
    pub fn critical_path(&self) -> &[String] {
        &self.critical_path
    }

    /// Critical path framed by START and END.
    pub fn critical_path_with_boundaries(&self) -> Vec<String> {
        let mut path = Vec::with_capacity(self.critical_path.len() + 2);
        path.push(START_NODE.to_string());
        path.extend(self.critical_path.iter().cloned());
        path.push(END_NODE.to_string());
        path
    }

    /// Sum of variances along the critical path.
    pub fn project_variance(&self) -> f64 {
        self.project_variance
    }

    /// Square root of [`project_variance`](Self::project_variance).
    pub fn project_standard_deviation(&self) -> f64 {
        self.project_standard_deviation
    }

    /// Completion ranges at ±1σ, ±2σ and ±3σ around the project duration.
    pub fn confidence_bands(&self) -> [ConfidenceBand; 3] {
        BAND_COVERAGE.map(|(sigmas, coverage)| {
            let spread = f64::from(sigmas) * self.project_standard_deviation;
            ConfidenceBand {
                sigmas,
                coverage,
                lower: self.project_duration - spread,
                upper: self.project_duration + spread,
            }
        })
    }

    /// Number of activities (boundary nodes excluded).
    pub fn activity_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule holds no activities.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
