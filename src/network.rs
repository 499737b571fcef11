//! Node-and-arrow view of a computed schedule.
//!
//! Supplies diagram renderers with the arrows to draw (including the edges
//! from START and into END) and a column index per node. Drawing itself is
//! left to the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{ProjectSchedule, END_NODE, START_NODE};

/// A directed edge between two diagram nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: String,
    pub to: String,
    /// Whether the arrow lies on the critical path.
    pub critical: bool,
}

impl Arrow {
    fn new(from: impl Into<String>, to: impl Into<String>, critical: bool) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            critical,
        }
    }
}

/// A node and its diagram column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLevel {
    pub name: String,
    pub level: usize,
}

/// All arrows of the network.
///
/// Order: START → initial activities, then predecessor → activity edges
/// (in activity order), then final activities → END.
///
/// An arrow between two activities is critical only when both ends are.
pub fn arrows(schedule: &ProjectSchedule) -> Vec<Arrow> {
    let entries = schedule.entries();
    let critical: HashMap<&str, bool> = entries
        .iter()
        .map(|e| (e.name.as_str(), e.is_critical))
        .collect();
    let mut out = Vec::new();

    for e in entries.iter().filter(|e| e.predecessors.is_empty()) {
        out.push(Arrow::new(START_NODE, &e.name, e.is_critical));
    }

    for e in entries {
        for pred in &e.predecessors {
            let pred_critical = critical.get(pred.as_str()).copied().unwrap_or(false);
            out.push(Arrow::new(pred, &e.name, pred_critical && e.is_critical));
        }
    }

    for e in entries.iter().filter(|e| schedule.successors(&e.name).is_empty()) {
        out.push(Arrow::new(&e.name, END_NODE, e.is_critical));
    }

    out
}

/// Diagram column of every node.
///
/// START is level 0, activities without predecessors level 1, any other
/// activity one past its deepest predecessor, and END one past the deepest
/// activity. Activities keep input order between START and END.
pub fn levels(schedule: &ProjectSchedule) -> Vec<NodeLevel> {
    let entries = schedule.entries();
    let mut level: HashMap<&str, usize> = HashMap::with_capacity(entries.len());

    // Each sweep resolves at least one more activity on acyclic input.
    for _ in 0..=entries.len() {
        let mut changed = false;
        for e in entries {
            if level.contains_key(e.name.as_str()) {
                continue;
            }
            let resolved: Option<Vec<usize>> = e
                .predecessors
                .iter()
                .map(|p| level.get(p.as_str()).copied())
                .collect();
            if let Some(pred_levels) = resolved {
                let depth = pred_levels.into_iter().max().unwrap_or(0) + 1;
                level.insert(e.name.as_str(), depth);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let max_level = level.values().copied().max().unwrap_or(0);
    let mut out = Vec::with_capacity(entries.len() + 2);
    out.push(NodeLevel {
        name: START_NODE.to_string(),
        level: 0,
    });
    for e in entries {
        if let Some(&l) = level.get(e.name.as_str()) {
            out.push(NodeLevel {
                name: e.name.clone(),
                level: l,
            });
        }
    }
    out.push(NodeLevel {
        name: END_NODE.to_string(),
        level: max_level + 1,
    });
    out
}

/// Node names grouped by level, in column order.
pub fn layers(schedule: &ProjectSchedule) -> Vec<Vec<String>> {
    let nodes = levels(schedule);
    let depth = nodes.iter().map(|n| n.level).max().unwrap_or(0);
    let mut out = vec![Vec::new(); depth + 1];
    for node in nodes {
        out[node.level].push(node.name);
    }
    out
}
