//! Tabular import adapter.
//!
//! Maps spreadsheet-like tables (a header row plus string records) onto
//! [`RawRow`]s. Column headers are matched loosely so that files such as
//! `Actividad, Duración (días), Predecesoras` and
//! `Task, Duration, Depends on` both load.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::RawRow;

const ACTIVITY_ALIASES: &[&str] = &["activity", "actividad", "name", "task"];
const DURATION_ALIASES: &[&str] = &["duration", "duración", "duracion"];
const PREDECESSOR_ALIASES: &[&str] = &["predecessor", "predecesora", "depends"];

/// Import failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("The table is empty or has no data rows")]
    Empty,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Positions of the three required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub activity: usize,
    pub duration: usize,
    pub predecessors: usize,
}

impl ColumnMapping {
    /// Locates the required columns.
    ///
    /// A header matches a column when, lower-cased, it contains one of that
    /// column's aliases. The first matching header wins.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Result<Self, ImportError> {
        let lowered: Vec<String> = headers
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect();
        let find = |aliases: &[&str]| {
            lowered
                .iter()
                .position(|h| aliases.iter().any(|a| h.contains(a)))
        };

        let activity = find(ACTIVITY_ALIASES);
        let duration = find(DURATION_ALIASES);
        let predecessors = find(PREDECESSOR_ALIASES);

        match (activity, duration, predecessors) {
            (Some(activity), Some(duration), Some(predecessors)) => Ok(Self {
                activity,
                duration,
                predecessors,
            }),
            _ => {
                let missing = [
                    ("activity", activity),
                    ("duration", duration),
                    ("predecessors", predecessors),
                ]
                .into_iter()
                .filter(|(_, found)| found.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                Err(ImportError::MissingColumns(missing))
            }
        }
    }

    /// Builds a raw row from one record. Absent cells read as empty.
    pub fn row<S: AsRef<str>>(&self, record: &[S]) -> RawRow {
        let cell = |i: usize| record.get(i).map(|c| c.as_ref()).unwrap_or_default();
        RawRow::new(cell(self.activity), cell(self.duration), cell(self.predecessors))
    }
}

/// Converts a table into raw rows, skipping records with a blank activity
/// cell.
pub fn rows_from_table<H, S>(headers: &[H], records: &[Vec<S>]) -> Result<Vec<RawRow>, ImportError>
where
    H: AsRef<str>,
    S: AsRef<str>,
{
    if headers.is_empty() || records.is_empty() {
        return Err(ImportError::Empty);
    }
    let mapping = ColumnMapping::detect(headers)?;
    let rows: Vec<RawRow> = records
        .iter()
        .map(|r| mapping.row(r))
        .filter(|r| !r.name.trim().is_empty())
        .collect();
    debug!(records = records.len(), imported = rows.len(), "table imported");
    Ok(rows)
}
