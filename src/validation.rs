//! Activity network validation.
//!
//! Normalizes raw rows into activities and checks the structural integrity
//! of the network before scheduling. Detects:
//! - Negative (or non-finite) durations
//! - Duplicate activity names
//! - Activities listing themselves as predecessor
//! - Predecessor references to unknown activities
//! - Circular precedence dependencies (DAG validation)
//!
//! All problems are collected and reported together so they can be fixed in
//! one pass.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{normalize_name, Activity, RawRow};

/// Validation result.
pub type ValidationResult = Result<Vec<Activity>, ValidationError>;

/// Aggregated validation failure.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("Validation failed: {}", join_messages(.issues))]
pub struct ValidationError {
    /// Every detected issue, in detection order.
    pub issues: Vec<ValidationIssue>,
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Duration is below zero.
    NegativeDuration,
    /// Duration is NaN or infinite.
    InvalidDuration,
    /// Two activities share the same name.
    DuplicateName,
    /// An activity lists itself as predecessor.
    SelfPredecessor,
    /// A predecessor name matches no activity.
    UnknownPredecessor,
    /// Precedence graph contains a cycle.
    CyclicDependency,
}

impl ValidationIssue {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl ValidationError {
    /// Messages of all issues, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }

    /// Whether any issue has the given kind.
    pub fn has(&self, kind: ValidationErrorKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

fn join_messages(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates raw input rows.
///
/// Each row is normalized (see [`RawRow::to_activity`]) and then checked by
/// [`validate_activities`].
pub fn validate(rows: &[RawRow]) -> ValidationResult {
    validate_activities(rows.iter().map(RawRow::to_activity))
}

/// Validates typed activities.
///
/// Checks:
/// 1. Rows with a blank name are skipped silently
/// 2. Duration is finite and non-negative
/// 3. Name not seen on an earlier row (later occurrences are rejected)
/// 4. Name not in its own predecessor list
/// 5. Every predecessor of an accepted activity exists
/// 6. No circular precedence dependencies
///
/// Checks 2-4 stop at the first failure of a row; the row is then dropped
/// from the cross-row checks. Names and predecessors are trimmed and
/// upper-cased first.
///
/// # Returns
/// The accepted activities in input order, or every detected issue.
pub fn validate_activities(inputs: impl IntoIterator<Item = Activity>) -> ValidationResult {
    let mut issues = Vec::new();
    let mut names: HashSet<String> = HashSet::new();
    let mut accepted: Vec<Activity> = Vec::new();

    for input in inputs {
        let activity = normalize(input);
        if activity.name.is_empty() {
            debug!("skipping row with blank activity name");
            continue;
        }
        if let Some(issue) = check_row(&activity, &names) {
            issues.push(issue);
            continue;
        }
        names.insert(activity.name.clone());
        accepted.push(activity);
    }

    // Check predecessor references
    for act in &accepted {
        for pred in &act.predecessors {
            if !names.contains(pred) {
                issues.push(ValidationIssue::new(
                    ValidationErrorKind::UnknownPredecessor,
                    format!("Predecessor \"{}\" of \"{}\" does not exist.", pred, act.name),
                ));
            }
        }
    }

    if has_cycle(&accepted) {
        issues.push(ValidationIssue::new(
            ValidationErrorKind::CyclicDependency,
            "Cyclic dependencies detected among activities.",
        ));
    }

    if issues.is_empty() {
        debug!(activities = accepted.len(), "activity network is valid");
        Ok(accepted)
    } else {
        warn!(issues = issues.len(), "activity network failed validation");
        Err(ValidationError { issues })
    }
}

fn normalize(activity: Activity) -> Activity {
    let mut predecessors: Vec<String> = Vec::with_capacity(activity.predecessors.len());
    for pred in activity.predecessors.iter().map(|p| normalize_name(p)) {
        if !pred.is_empty() && !predecessors.contains(&pred) {
            predecessors.push(pred);
        }
    }
    Activity {
        name: normalize_name(&activity.name),
        duration: activity.duration,
        predecessors,
    }
}

fn check_row(activity: &Activity, seen: &HashSet<String>) -> Option<ValidationIssue> {
    let name = &activity.name;
    if !activity.duration.is_finite() {
        return Some(ValidationIssue::new(
            ValidationErrorKind::InvalidDuration,
            format!("Activity \"{name}\" has an invalid duration."),
        ));
    }
    if activity.duration < 0.0 {
        return Some(ValidationIssue::new(
            ValidationErrorKind::NegativeDuration,
            format!("Activity \"{name}\" cannot have a negative duration."),
        ));
    }
    if seen.contains(name) {
        return Some(ValidationIssue::new(
            ValidationErrorKind::DuplicateName,
            format!("Activity \"{name}\" is duplicated."),
        ));
    }
    if activity.depends_on(name) {
        return Some(ValidationIssue::new(
            ValidationErrorKind::SelfPredecessor,
            format!("Activity \"{name}\" cannot be its own predecessor."),
        ));
    }
    None
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Walks predecessor edges from every unvisited activity in input order. If
/// a node currently on the recursion stack is reached again, a cycle exists.
/// Only existence is reported, not the cycle's members.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn has_cycle(activities: &[Activity]) -> bool {
    let adj: HashMap<&str, &[String]> = activities
        .iter()
        .map(|a| (a.name.as_str(), a.predecessors.as_slice()))
        .collect();

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    activities.iter().any(|act| {
        !visited.contains(act.name.as_str())
            && has_cycle_dfs(&act.name, &adj, &mut visited, &mut in_stack)
    })
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, &'a [String]>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(&preds) = adj.get(node) {
        for next in preds {
            let next = next.as_str();
            // Unknown predecessors are reported separately.
            if !adj.contains_key(next) {
                continue;
            }
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str, &str)]) -> Vec<RawRow> {
        data.iter()
            .map(|(n, d, p)| RawRow::new(*n, *d, *p))
            .collect()
    }

    #[test]
    fn test_valid_input() {
        let input = rows(&[("A", "3", ""), ("B", "2", "A"), ("C", "4", "A"), ("D", "1", "B, C")]);
        let acts = validate(&input).unwrap();
        assert_eq!(acts.len(), 4);
        assert_eq!(acts[3].predecessors, vec!["B", "C"]);
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let input = rows(&[(" a ", "1", ""), ("b", "2", " a ,")]);
        let acts = validate(&input).unwrap();
        assert_eq!(acts[0].name, "A");
        assert_eq!(acts[1].name, "B");
        assert_eq!(acts[1].predecessors, vec!["A"]);
    }

    #[test]
    fn test_blank_names_skipped() {
        let input = rows(&[("", "5", "X"), ("   ", "1", ""), ("A", "1", "")]);
        let acts = validate(&input).unwrap();
        assert_eq!(acts.len(), 1);
        assert_eq!(acts[0].name, "A");
    }

    #[test]
    fn test_unparseable_duration_defaults_to_zero() {
        let acts = validate(&rows(&[("A", "soon", "")])).unwrap();
        assert!((acts[0].duration - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_duplicate_name() {
        let err = validate(&rows(&[("A", "1", ""), ("A", "2", "")])).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].kind, ValidationErrorKind::DuplicateName);
        assert_eq!(err.issues[0].message, "Activity \"A\" is duplicated.");
    }

    #[test]
    fn test_duplicate_detected_after_normalization() {
        let err = validate(&rows(&[("a", "1", ""), (" A", "2", "")])).unwrap_err();
        assert!(err.has(ValidationErrorKind::DuplicateName));
    }

    #[test]
    fn test_negative_duration() {
        let err = validate(&rows(&[("A", "-3", "")])).unwrap_err();
        assert!(err.has(ValidationErrorKind::NegativeDuration));
    }

    #[test]
    fn test_non_finite_duration() {
        let err = validate_activities(vec![Activity::new("A", f64::NAN)]).unwrap_err();
        assert!(err.has(ValidationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_self_predecessor() {
        let err = validate(&rows(&[("A", "1", "a")])).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].kind, ValidationErrorKind::SelfPredecessor);
    }

    #[test]
    fn test_unknown_predecessor() {
        let err = validate(&rows(&[("A", "1", ""), ("B", "1", "A, X")])).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].kind, ValidationErrorKind::UnknownPredecessor);
        assert_eq!(err.issues[0].message, "Predecessor \"X\" of \"B\" does not exist.");
    }

    #[test]
    fn test_rejected_row_not_a_valid_predecessor() {
        // A is rejected for negative duration, so B's reference is unknown.
        let err = validate(&rows(&[("A", "-1", ""), ("B", "1", "A")])).unwrap_err();
        assert!(err.has(ValidationErrorKind::NegativeDuration));
        assert!(err.has(ValidationErrorKind::UnknownPredecessor));
    }

    #[test]
    fn test_cyclic_dependency() {
        let err = validate(&rows(&[("A", "1", "B"), ("B", "1", "A")])).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].kind, ValidationErrorKind::CyclicDependency);
    }

    #[test]
    fn test_three_node_cycle() {
        // O1 → O2 → O3 → O1
        let err = validate(&rows(&[("O1", "1", "O3"), ("O2", "1", "O1"), ("O3", "1", "O2")]))
            .unwrap_err();
        assert!(err.has(ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_no_cycle_in_diamond() {
        let input = rows(&[("D", "1", "B,C"), ("B", "1", "A"), ("C", "1", "A"), ("A", "1", "")]);
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_multiple_errors_collected_in_order() {
        let input = rows(&[
            ("A", "-1", ""),
            ("B", "1", "B"),
            ("C", "1", ""),
            ("C", "1", ""),
            ("D", "1", "Z"),
        ]);
        let err = validate(&input).unwrap_err();
        let kinds: Vec<_> = err.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::NegativeDuration,
                ValidationErrorKind::SelfPredecessor,
                ValidationErrorKind::DuplicateName,
                ValidationErrorKind::UnknownPredecessor,
            ]
        );
        assert_eq!(err.messages().len(), 4);
    }

    #[test]
    fn test_error_display_joins_messages() {
        let err = validate(&rows(&[("A", "1", "A"), ("B", "-1", "")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Activity \"A\" cannot be its own predecessor.; \
             Activity \"B\" cannot have a negative duration."
        );
    }

    #[test]
    fn test_duplicate_predecessors_collapsed() {
        let acts = validate(&rows(&[("A", "1", ""), ("B", "1", "A, a, A")])).unwrap();
        assert_eq!(acts[1].predecessors, vec!["A"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(validate(&[]).unwrap().is_empty());
    }
}
