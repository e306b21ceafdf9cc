//! Calculation history
//!
//! [`History`] is an ordered, append-only record of performed calculations.
//! It is owned by the [`Calculator`](crate::Calculator) and reaches commands
//! through their context, never through global state.
//!
//! # Persistence
//!
//! `save` and `load` round-trip the whole sequence through a CSV file with
//! the fixed column set `operation,operand_a,operand_b,result`:
//!
//! ```text
//! operation,operand_a,operand_b,result
//! add,5.0,3.0,8.0
//! sqrt,4.0,,2.0
//! ```

mod entry;
mod file;

pub use entry::HistoryEntry;
pub use file::HEADER;

use crate::calculation::Calculation;
use crate::display::format_number;
use crate::operation::MathError;
use rust_decimal::Decimal;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid history file: {0}")]
    Format(String),
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Append an entry
    pub fn add(&mut self, entry: HistoryEntry) {
        tracing::info!(
            operation = %entry.operation,
            result = %entry.result,
            "added to history"
        );
        self.entries.push(entry);
    }

    /// Perform `calculation` and record it. Failed calculations are not recorded.
    pub fn add_calculation(&mut self, calculation: &Calculation) -> Result<Decimal, MathError> {
        let result = calculation.perform()?;
        self.add(HistoryEntry::from_calculation(calculation, result));
        Ok(result)
    }

    /// Most recently added entry
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// All entries in insertion order
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::info!("cleared history");
    }

    /// Write the full history to `path` as CSV
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        file::write_entries(path, &self.entries)?;
        tracing::info!(path = %path.display(), entries = self.entries.len(), "saved history");
        Ok(())
    }

    /// Replace the history with the contents of `path`.
    ///
    /// On error the current entries are kept.
    pub fn load(&mut self, path: &Path) -> Result<(), HistoryError> {
        let entries = file::read_entries(path)?;
        tracing::info!(path = %path.display(), entries = entries.len(), "loaded history");
        self.entries = entries;
        Ok(())
    }

    pub fn display(&self) -> HistoryView<'_> {
        if self.entries.is_empty() {
            HistoryView::Empty
        } else {
            HistoryView::Entries(&self.entries)
        }
    }
}

/// User-facing view of the history
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryView<'a> {
    Empty,
    Entries(&'a [HistoryEntry]),
}

impl HistoryView<'_> {
    pub const EMPTY_MESSAGE: &'static str = "No history available.";
}

impl fmt::Display for HistoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryView::Empty => f.write_str(Self::EMPTY_MESSAGE),
            HistoryView::Entries(entries) => {
                write!(f, "{}", HEADER.join("\t"))?;
                for entry in entries.iter() {
                    let b = entry.operand_b.map(format_number).unwrap_or_default();
                    write!(
                        f,
                        "\n{}\t{}\t{}\t{}",
                        entry.operation,
                        format_number(entry.operand_a),
                        b,
                        format_number(entry.result)
                    )?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;
    use std::fs;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample() -> History {
        let mut history = History::new();
        history.add(HistoryEntry::new("add", d("5"), Some(d("3")), d("8")));
        history.add(HistoryEntry::new("sqrt", d("4"), None, d("2")));
        history
    }

    #[test]
    fn test_add_preserves_order() {
        let e1 = HistoryEntry::new("add", d("1"), Some(d("2")), d("3"));
        let e2 = HistoryEntry::new("subtract", d("10.5"), Some(d("4.25")), d("6.25"));
        let mut history = History::new();
        history.add(e1.clone());
        history.add(e2.clone());
        assert_eq!(history.all(), &[e1, e2.clone()]);
        assert_eq!(history.last(), Some(&e2));
    }

    #[test]
    fn test_duplicates_allowed() {
        let e = HistoryEntry::new("add", d("1"), Some(d("1")), d("2"));
        let mut history = History::new();
        history.add(e.clone());
        history.add(e.clone());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut history = sample();
        history.clear();
        assert!(history.all().is_empty());
        assert_eq!(history.last(), None);
    }

    #[test]
    fn test_add_calculation_records_result() {
        let mut history = History::new();
        let result = history
            .add_calculation(&Calculation::create(d("20"), Some(d("5")), Operation::Divide))
            .unwrap();
        assert_eq!(result, d("4"));
        assert_eq!(history.all(), &[HistoryEntry::new("divide", d("20"), Some(d("5")), d("4"))]);
    }

    #[test]
    fn test_failed_calculation_not_recorded() {
        let mut history = History::new();
        let err = history
            .add_calculation(&Calculation::create(d("1"), Some(d("0")), Operation::Divide))
            .unwrap_err();
        assert!(matches!(err, MathError::Domain(_)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let history = sample();
        history.save(&path).unwrap();

        let mut loaded = History::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_save_writes_header_and_empty_operand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        sample().save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("operation,operand_a,operand_b,result"));
        assert!(lines.next().unwrap().starts_with("add,5"));
        let sqrt_row = lines.next().unwrap();
        assert!(sqrt_row.starts_with("sqrt,4"));
        assert!(sqrt_row.contains(",,"));
    }

    #[test]
    fn test_decimal_values_round_trip_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let mut history = History::new();
        history.add(HistoryEntry::new("add", d("0.1"), Some(d("0.2")), d("0.3")));
        history.add(HistoryEntry::new("sqrt", d("2"), None, d("1.4142135623730950488016887242")));
        history.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("add,0.1,0.2,0.3"));
        assert!(content.contains("1.4142135623730950488016887242"));

        let mut loaded = History::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_save_empty_history_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        History::new().save(&path).unwrap();

        let mut loaded = sample();
        loaded.load(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_invalid_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("history.csv");
        let err = sample().save(&path).unwrap_err();
        assert!(matches!(err, HistoryError::Io { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::new();
        let err = history.load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, HistoryError::NotFound(_)));
    }

    #[test]
    fn test_load_empty_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        let err = History::new().load(&path).unwrap_err();
        assert!(matches!(err, HistoryError::Format(_)));
    }

    #[test]
    fn test_load_wrong_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.csv");
        fs::write(&path, "operation,a,b,result\nadd,1,2,3\n").unwrap();
        let err = History::new().load(&path).unwrap_err();
        assert!(matches!(err, HistoryError::Format(_)));
    }

    #[test]
    fn test_load_bad_row_keeps_current_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "operation,operand_a,operand_b,result\nadd,five,3,8\n").unwrap();

        let mut history = sample();
        let err = history.load(&path).unwrap_err();
        assert!(matches!(err, HistoryError::Format(_)));
        assert_eq!(history, sample());
    }

    #[test]
    fn test_display() {
        assert_eq!(History::new().display(), HistoryView::Empty);
        assert_eq!(History::new().display().to_string(), "No history available.");

        let history = sample();
        let text = history.display().to_string();
        assert!(text.starts_with("operation\toperand_a\toperand_b\tresult"));
        assert!(text.contains("add\t5\t3\t8"));
        assert!(text.contains("sqrt\t4\t\t2"));

        let mut history = History::new();
        history.add(HistoryEntry::new("multiply", d("4"), Some(d("2.5")), d("10.0")));
        assert!(history.display().to_string().ends_with("multiply\t4\t2.5\t10"));
    }
}
