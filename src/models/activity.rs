//! Activity model.
//!
//! An activity is a named unit of project work with a duration and a set of
//! predecessor activities that must finish before it can start.
//!
//! # Input Forms
//!
//! - [`RawRow`]: an unparsed grid or spreadsheet row. Duration and
//!   predecessors are still text.
//! - [`Activity`]: a typed record. Activities returned by
//!   [`crate::validation::validate`] are normalized (trimmed, upper-cased)
//!   and guaranteed to form an acyclic network.

use serde::{Deserialize, Serialize};

/// A project activity.
///
/// Zero duration is allowed and models a milestone or dummy activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique, case-normalized activity name.
    pub name: String,
    /// Time required to complete this activity.
    pub duration: f64,
    /// Names of activities that must finish before this one starts.
    pub predecessors: Vec<String>,
}

impl Activity {
    /// Creates an activity with no predecessors.
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            predecessors: Vec::new(),
        }
    }

    /// Adds a predecessor activity name.
    pub fn with_predecessor(mut self, name: impl Into<String>) -> Self {
        self.predecessors.push(name.into());
        self
    }

    /// Replaces the predecessor list.
    pub fn with_predecessors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = names.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this activity starts the network (no predecessors).
    #[inline]
    pub fn is_initial(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Whether `name` is one of this activity's predecessors.
    pub fn depends_on(&self, name: &str) -> bool {
        self.predecessors.iter().any(|p| p == name)
    }
}

/// An unparsed input row, as typed into a grid or read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Activity name cell.
    pub name: String,
    /// Duration cell, parsed as an integer.
    pub duration: String,
    /// Comma-separated predecessor names.
    pub predecessors: String,
}

impl RawRow {
    /// Creates a raw row from its three cells.
    pub fn new(
        name: impl Into<String>,
        duration: impl Into<String>,
        predecessors: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            duration: duration.into(),
            predecessors: predecessors.into(),
        }
    }

    /// Trimmed, upper-cased name. Empty if the cell is blank.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Parses the duration cell.
    ///
    /// Reads an optional sign followed by leading digits, ignoring any
    /// trailing text (`"7 days"` → 7). Cells with no leading digits parse
    /// as 0.
    pub fn parsed_duration(&self) -> i64 {
        parse_integer_prefix(&self.duration).unwrap_or(0)
    }

    /// Splits the predecessor cell on commas, normalizing each token and
    /// dropping blanks.
    pub fn predecessor_names(&self) -> Vec<String> {
        self.predecessors
            .split(',')
            .map(normalize_name)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Converts into a typed activity. No validation is performed.
    pub fn to_activity(&self) -> Activity {
        Activity {
            name: self.normalized_name(),
            duration: self.parsed_duration() as f64,
            predecessors: self.predecessor_names(),
        }
    }
}

/// Trims and upper-cases an activity name token.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn parse_integer_prefix(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_builder() {
        let act = Activity::new("D", 1.0)
            .with_predecessor("B")
            .with_predecessor("C");

        assert_eq!(act.name, "D");
        assert!((act.duration - 1.0).abs() < 1e-10);
        assert_eq!(act.predecessors, vec!["B", "C"]);
        assert!(act.depends_on("B"));
        assert!(!act.depends_on("A"));
        assert!(!act.is_initial());
    }

    #[test]
    fn test_with_predecessors_replaces() {
        let act = Activity::new("X", 2.0)
            .with_predecessor("OLD")
            .with_predecessors(["A", "B"]);
        assert_eq!(act.predecessors, vec!["A", "B"]);
    }

    #[test]
    fn test_raw_row_normalization() {
        let row = RawRow::new("  a1 ", "3", " b, c ,,d ");
        assert_eq!(row.normalized_name(), "A1");
        assert_eq!(row.predecessor_names(), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_raw_row_duration_parsing() {
        assert_eq!(RawRow::new("A", "5", "").parsed_duration(), 5);
        assert_eq!(RawRow::new("A", " 7 days", "").parsed_duration(), 7);
        assert_eq!(RawRow::new("A", "-2", "").parsed_duration(), -2);
        assert_eq!(RawRow::new("A", "+4", "").parsed_duration(), 4);
        assert_eq!(RawRow::new("A", "3.9", "").parsed_duration(), 3);
        assert_eq!(RawRow::new("A", "", "").parsed_duration(), 0);
        assert_eq!(RawRow::new("A", "abc", "").parsed_duration(), 0);
        assert_eq!(RawRow::new("A", "-", "").parsed_duration(), 0);
    }

    #[test]
    fn test_raw_row_empty_predecessors() {
        let row = RawRow::new("A", "1", "   ");
        assert!(row.predecessor_names().is_empty());
    }

    #[test]
    fn test_to_activity() {
        let act = RawRow::new("c", "4", "a").to_activity();
        assert_eq!(act, Activity::new("C", 4.0).with_predecessor("A"));
    }
}
