//! PERT/CPM forward and backward pass.
//!
//! # Algorithm
//!
//! 1. **Forward pass**: `TE = max(TF of predecessors, 0)`, `TF = TE + d`.
//!    Project duration is the largest TF.
//! 2. **Backward pass**: activities without successors get
//!    `TL = project duration`. Every other activity, once all of its
//!    successors are resolved, gets `TL = min(TE of successors)`.
//! 3. **Derived**: `TI = TL - d`, `slack = TI - TE`,
//!    critical iff `|slack| < tolerance`.
//! 4. **Estimates**: three-point values synthesized from `d`.
//!
//! With [`PassStrategy::FixedPoint`] both passes sweep the activities in
//! declaration order until a sweep changes nothing, so any declaration order
//! works. [`PassStrategy::Topological`] orders the network once and does a
//! single sweep per pass.
//!
//! # Complexity
//! Fixed point: O(k · (n + e)) for k sweeps. Topological: O(n + e).
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info};

use super::{PassStrategy, SchedulerConfig};
use crate::error::{ContractViolation, Pass};
use crate::models::{Activity, ProjectSchedule, ScheduleEntry, ThreePointEstimate};

/// PERT/CPM scheduler.
///
/// Expects activities that already passed [`crate::validation::validate`].
/// Invalid input is reported as a [`ContractViolation`], never as a partial
/// schedule.
///
/// # Example
///
/// ```
/// use u_pert::models::Activity;
/// use u_pert::scheduler::PertScheduler;
///
/// let activities = vec![
///     Activity::new("A", 3.0),
///     Activity::new("B", 2.0).with_predecessor("A"),
///     Activity::new("C", 4.0).with_predecessor("A"),
///     Activity::new("D", 1.0).with_predecessors(["B", "C"]),
/// ];
///
/// let schedule = PertScheduler::new().schedule(&activities).unwrap();
/// assert_eq!(schedule.project_duration(), 8.0);
/// assert_eq!(schedule.critical_path(), ["A", "C", "D"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PertScheduler {
    config: SchedulerConfig,
}

/// Index-based view of the activity network.
struct Network<'a> {
    activities: &'a [Activity],
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
}

impl<'a> Network<'a> {
    fn build(activities: &'a [Activity]) -> Result<Self, ContractViolation> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(activities.len());
        for (i, act) in activities.iter().enumerate() {
            if index.insert(act.name.as_str(), i).is_some() {
                return Err(ContractViolation::DuplicateActivity(act.name.clone()));
            }
        }

        let mut predecessors = vec![Vec::new(); activities.len()];
        let mut successors = vec![Vec::new(); activities.len()];
        for (i, act) in activities.iter().enumerate() {
            for pred in &act.predecessors {
                let &p = index.get(pred.as_str()).ok_or_else(|| {
                    ContractViolation::UnknownPredecessor {
                        activity: act.name.clone(),
                        predecessor: pred.clone(),
                    }
                })?;
                predecessors[i].push(p);
                successors[p].push(i);
            }
        }

        Ok(Self {
            activities,
            predecessors,
            successors,
        })
    }

    fn len(&self) -> usize {
        self.activities.len()
    }

    fn duration(&self, i: usize) -> f64 {
        self.activities[i].duration
    }

    fn name(&self, i: usize) -> &str {
        &self.activities[i].name
    }

    /// Kahn ordering, seeded in declaration order.
    fn topological_order(&self) -> Result<Vec<usize>, ContractViolation> {
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..self.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(self.len());

        while let Some(i) = queue.pop_front() {
            order.push(i);
            for &s in &self.successors[i] {
                in_degree[s] -= 1;
                if in_degree[s] == 0 {
                    queue.push_back(s);
                }
            }
        }

        if order.len() < self.len() {
            let stuck = (0..self.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.name(i).to_string())
                .collect();
            return Err(ContractViolation::CycleDetected(stuck));
        }
        Ok(order)
    }
}

/// Early times per activity, indexed like the input.
struct ForwardPass {
    early_start: Vec<f64>,
    early_finish: Vec<f64>,
}

impl ForwardPass {
    fn project_duration(&self) -> f64 {
        self.early_finish.iter().copied().fold(0.0, f64::max)
    }
}

impl PertScheduler {
    /// Creates a scheduler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given settings.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Computes the PERT/CPM schedule of a validated activity set.
    ///
    /// Pure and deterministic: the same input always yields the same
    /// schedule.
    pub fn schedule(&self, activities: &[Activity]) -> Result<ProjectSchedule, ContractViolation> {
        let network = Network::build(activities)?;

        let (forward, late_finish) = match self.config.strategy {
            PassStrategy::FixedPoint => {
                let forward = self.forward_fixed_point(&network)?;
                let late = self.backward_fixed_point(&network, &forward)?;
                (forward, late)
            }
            PassStrategy::Topological => {
                let order = network.topological_order()?;
                let forward = forward_topological(&network, &order);
                let late = backward_topological(&network, &forward, &order);
                (forward, late)
            }
        };

        let entries: Vec<ScheduleEntry> = activities
            .iter()
            .enumerate()
            .map(|(i, act)| self.entry(act, forward.early_start[i], late_finish[i]))
            .collect();

        let schedule = ProjectSchedule::from_entries(entries);
        info!(
            activities = schedule.activity_count(),
            duration = schedule.project_duration(),
            critical = schedule.critical_path().len(),
            "PERT schedule computed"
        );
        Ok(schedule)
    }

    /// Sweeps allowed per fixed-point pass.
    ///
    /// An acyclic network settles within `n + 1` sweeps, so the configured
    /// cap is raised to that bound.
    fn sweep_limit(&self, net: &Network<'_>) -> usize {
        self.config.max_iterations.max(net.len() + 1)
    }

    fn entry(&self, act: &Activity, early_start: f64, late_finish: f64) -> ScheduleEntry {
        let late_start = late_finish - act.duration;
        let slack = late_start - early_start;
        ScheduleEntry {
            name: act.name.clone(),
            duration: act.duration,
            predecessors: act.predecessors.clone(),
            early_start,
            early_finish: early_start + act.duration,
            late_finish,
            late_start,
            slack,
            is_critical: slack.abs() < self.config.critical_tolerance,
            estimate: ThreePointEstimate::from_duration(act.duration, &self.config.estimate),
        }
    }

    /// Sweeps until no TE/TF changes.
    fn forward_fixed_point(&self, net: &Network<'_>) -> Result<ForwardPass, ContractViolation> {
        let n = net.len();
        let mut early_start = vec![0.0; n];
        let mut early_finish = vec![0.0; n];

        let limit = self.sweep_limit(net);
        let mut iterations = 0;
        let mut changed = n > 0;
        while changed {
            if iterations == limit {
                return Err(ContractViolation::NonConvergence {
                    pass: Pass::Forward,
                    iterations,
                });
            }
            iterations += 1;
            changed = false;

            for i in 0..n {
                let start = net.predecessors[i]
                    .iter()
                    .map(|&p| early_finish[p])
                    .fold(0.0, f64::max);
                let finish = start + net.duration(i);
                if start != early_start[i] || finish != early_finish[i] {
                    early_start[i] = start;
                    early_finish[i] = finish;
                    changed = true;
                    debug!(activity = net.name(i), te = start, tf = finish, "forward update");
                }
            }
        }
        debug!(iterations, "forward pass converged");

        Ok(ForwardPass {
            early_start,
            early_finish,
        })
    }

    /// Seeds final activities with the project duration, then resolves each
    /// remaining activity once all of its successors are resolved.
    fn backward_fixed_point(
        &self,
        net: &Network<'_>,
        forward: &ForwardPass,
    ) -> Result<Vec<f64>, ContractViolation> {
        let n = net.len();
        let project_duration = forward.project_duration();
        let mut late_finish: Vec<Option<f64>> = (0..n)
            .map(|i| net.successors[i].is_empty().then_some(project_duration))
            .collect();

        let limit = self.sweep_limit(net);
        let mut iterations = 0;
        let mut changed = n > 0;
        while changed {
            if iterations == limit {
                return Err(ContractViolation::NonConvergence {
                    pass: Pass::Backward,
                    iterations,
                });
            }
            iterations += 1;
            changed = false;

            for i in 0..n {
                if late_finish[i].is_some() {
                    continue;
                }
                let succs = &net.successors[i];
                if succs.iter().all(|&s| late_finish[s].is_some()) {
                    let tl = min_successor_start(succs, forward);
                    late_finish[i] = Some(tl);
                    changed = true;
                    debug!(activity = net.name(i), tl, "backward update");
                }
            }
        }
        debug!(iterations, "backward pass converged");

        // Unresolved nodes only remain when successors form a cycle.
        late_finish
            .into_iter()
            .collect::<Option<Vec<f64>>>()
            .ok_or(ContractViolation::NonConvergence {
                pass: Pass::Backward,
                iterations,
            })
    }
}

fn forward_topological(net: &Network<'_>, order: &[usize]) -> ForwardPass {
    let n = net.len();
    let mut early_start = vec![0.0; n];
    let mut early_finish = vec![0.0; n];
    for &i in order {
        let start = net.predecessors[i]
            .iter()
            .map(|&p| early_finish[p])
            .fold(0.0, f64::max);
        early_start[i] = start;
        early_finish[i] = start + net.duration(i);
    }
    ForwardPass {
        early_start,
        early_finish,
    }
}

fn backward_topological(net: &Network<'_>, forward: &ForwardPass, order: &[usize]) -> Vec<f64> {
    let project_duration = forward.project_duration();
    let mut late_finish = vec![project_duration; net.len()];
    for &i in order.iter().rev() {
        let succs = &net.successors[i];
        if !succs.is_empty() {
            late_finish[i] = min_successor_start(succs, forward);
        }
    }
    late_finish
}

/// The latest finish allowed by successors: the earliest of their early
/// starts.
fn min_successor_start(successors: &[usize], forward: &ForwardPass) -> f64 {
    successors
        .iter()
        .map(|&s| forward.early_start[s])
        .fold(f64::INFINITY, f64::min)
}

/// Schedules with default settings.
pub fn schedule(activities: &[Activity]) -> Result<ProjectSchedule, ContractViolation> {
    PertScheduler::new().schedule(activities)
}
