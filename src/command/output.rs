use rust_decimal::Decimal;
use std::fmt;
use std::path::PathBuf;

use super::CommandInfo;
use crate::display::{format_count, format_number};
use crate::history::{HistoryEntry, HistoryView};

/// Value produced by a command.
///
/// Callers decide how to present it; the REPL prints it, tests inspect it.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Result of a calculation
    Number(Decimal),
    /// Snapshot of the history
    History(Vec<HistoryEntry>),
    /// Most recent history entry, if any
    Entry(Option<HistoryEntry>),
    Saved { path: PathBuf, count: usize },
    Loaded { path: PathBuf, count: usize },
    Cleared,
    Commands(Vec<CommandInfo>),
}

impl Output {
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Output::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Number(n) => write!(f, "Result: {}", format_number(*n)),
            Output::History(entries) if entries.is_empty() => {
                write!(f, "{}", HistoryView::Empty)
            }
            Output::History(entries) => write!(f, "{}", HistoryView::Entries(entries)),
            Output::Entry(None) => write!(f, "{}", HistoryView::Empty),
            Output::Entry(Some(entry)) => write!(f, "Last calculation: {}", entry),
            Output::Saved { path, count } => {
                write!(f, "History saved to {} ({})", path.display(), format_count(*count))
            }
            Output::Loaded { path, count } => {
                write!(f, "History loaded from {} ({})", path.display(), format_count(*count))
            }
            Output::Cleared => f.write_str("Calculation history cleared."),
            Output::Commands(commands) => {
                let width = commands
                    .iter()
                    .map(|c| c.name.len())
                    .chain(std::iter::once("exit".len()))
                    .max()
                    .unwrap_or(0);
                f.write_str("Available commands:")?;
                for command in commands {
                    write!(f, "\n  {:width$}  {}", command.name, command.summary, width = width)?;
                }
                write!(f, "\n  {:width$}  Leave the calculator", "exit", width = width)
            }
        }
    }
}
