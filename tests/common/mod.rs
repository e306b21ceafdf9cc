//! Common test utilities for pcalc integration tests

use rust_decimal::Decimal;
use std::path::PathBuf;

pub use pcalc::{Arg, Calculator, CommandError, HistoryEntry, LineError, Output, Registry};
use tempfile::TempDir;

/// Calculator whose default history file lives in a fresh temp directory.
/// Keep the `TempDir` alive for as long as the calculator is used.
pub fn calculator() -> (Calculator, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let calc = Calculator::with_registry(Registry::with_builtins(), dir.path().join("history.csv"));
    (calc, dir)
}

/// Arguments for `dispatch`, classified the way the parser would
pub fn nums(values: &[&str]) -> Vec<Arg> {
    values.iter().map(|v| Arg::from_word(v)).collect()
}

#[allow(dead_code)]
pub fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Helper to run one input line and return the printed form of its output
#[allow(dead_code)]
pub fn run(calc: &mut Calculator, line: &str) -> Result<String, String> {
    calc.execute_line(line)
        .map(|out| out.to_string())
        .map_err(|e| e.to_string())
}

/// Path inside `dir` as a text argument
#[allow(dead_code)]
pub fn path_arg(dir: &TempDir, name: &str) -> (PathBuf, Arg) {
    let path = dir.path().join(name);
    let arg = Arg::Text(path.to_string_lossy().into_owned());
    (path, arg)
}
