//! Plain-text schedule report.
//!
//! Three sections:
//!
//! | Section | Columns |
//! |---------|---------|
//! | Results | Activity, Duration, Predecessors, TE, TF, TL, TI, Slack, Critical |
//! | PERT times | Activity, To, Tm, Tp, σ, Variance |
//! | Project | duration, variance, σ, 68/95/99.7% ranges |

use std::fmt::{self, Write};

use crate::models::{ProjectSchedule, ScheduleEntry};

/// Renders the full report.
pub fn render(schedule: &ProjectSchedule) -> String {
    schedule.to_string()
}

fn write_report(out: &mut impl Write, schedule: &ProjectSchedule) -> fmt::Result {
    writeln!(
        out,
        "{:<10} {:>8} {:<14} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Activity", "Duration", "Predecessors", "TE", "TF", "TL", "TI", "Slack", "Critical"
    )?;
    for e in schedule.entries() {
        write_result_row(out, e)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{:<10} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Activity", "To", "Tm", "Tp", "Sigma", "Variance"
    )?;
    for e in schedule.entries() {
        let est = &e.estimate;
        writeln!(
            out,
            "{:<10} {:>8} {:>8} {:>8} {:>8.2} {:>8.2}",
            e.name,
            est.optimistic,
            est.most_likely,
            est.pessimistic,
            est.standard_deviation,
            est.variance
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Project duration: {}", schedule.project_duration())?;
    writeln!(
        out,
        "Critical path: {}",
        schedule.critical_path_with_boundaries().join(" -> ")
    )?;
    writeln!(
        out,
        "Project variance (critical path): {:.3}",
        schedule.project_variance()
    )?;
    writeln!(
        out,
        "Project standard deviation: {:.3}",
        schedule.project_standard_deviation()
    )?;
    for band in schedule.confidence_bands() {
        writeln!(
            out,
            "{:.1}% probability: {:.1} - {:.1}",
            band.coverage * 100.0,
            band.lower,
            band.upper
        )?;
    }
    Ok(())
}

fn write_result_row(out: &mut impl Write, e: &ScheduleEntry) -> fmt::Result {
    let predecessors = if e.predecessors.is_empty() {
        "-".to_string()
    } else {
        e.predecessors.join(", ")
    };
    writeln!(
        out,
        "{:<10} {:>8} {:<14} {:>8} {:>8} {:>8} {:>8} {:>8.2} {:>8}",
        e.name,
        e.duration,
        predecessors,
        e.early_start,
        e.early_finish,
        e.late_finish,
        e.late_start,
        e.slack,
        if e.is_critical { "YES" } else { "NO" }
    )
}

impl fmt::Display for ProjectSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;
    use crate::scheduler::schedule;

    fn scenario_a() -> ProjectSchedule {
        schedule(&[
            Activity::new("A", 3.0),
            Activity::new("B", 2.0).with_predecessor("A"),
            Activity::new("C", 4.0).with_predecessor("A"),
            Activity::new("D", 1.0).with_predecessors(["B", "C"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_result_rows() {
        let text = render(&scenario_a());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Activity"));
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            ["A", "3", "-", "0", "3", "3", "0", "0.00", "YES"]
        );
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            ["B", "2", "A", "3", "5", "7", "5", "2.00", "NO"]
        );
        assert!(lines[4].contains("B, C"));
    }

    #[test]
    fn test_pert_rows() {
        let text = render(&scenario_a());
        let row = text
            .lines()
            .find(|l| l.starts_with("C ") && l.split_whitespace().count() == 6)
            .unwrap();
        assert_eq!(
            row.split_whitespace().collect::<Vec<_>>(),
            ["C", "3", "4", "6", "0.50", "0.25"]
        );
    }

    #[test]
    fn test_project_section() {
        let text = render(&scenario_a());
        assert!(text.contains("Project duration: 8"));
        assert!(text.contains("Critical path: START -> A -> C -> D -> END"));
        assert!(text.contains("68.0% probability:"));
        assert!(text.contains("99.7% probability:"));
    }

    #[test]
    fn test_render_empty_schedule() {
        let text = render(&schedule(&[]).unwrap());
        assert_eq!(text.lines().next().map(|l| l.starts_with("Activity")), Some(true));
        assert!(text.contains("Critical path: START -> END"));
        assert!(text.contains("Project duration: 0"));
    }
}
