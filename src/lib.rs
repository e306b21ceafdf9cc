//! pcalc - an interactive calculator
//!
//! # Overview
//!
//! pcalc reads command lines such as `add(5, 3)` or `sqrt 16`, looks the
//! command name up in a [`Registry`], runs it and records every successful
//! calculation in a [`History`] that can be saved to and loaded from CSV.
//!
//! ```text
//! >>> add(5, 3)
//! Result: 8
//! >>> sqrt(16)
//! Result: 4
//! >>> save_history(session.csv)
//! History saved to session.csv (2 entries)
//! ```
//!
//! New commands come from [`Calculator::register`] or, with the `plugins`
//! feature, from TOML manifests found by [`plugin::discover`].
//!
//! # Example
//!
//! ```
//! use pcalc::{Arg, Calculator};
//! use rust_decimal::Decimal;
//!
//! let mut calc = Calculator::new();
//! let out = calc.dispatch("add", vec![Arg::from_word("0.1"), Arg::from_word("0.2")]).unwrap();
//! assert_eq!(out.as_number(), Some(Decimal::new(3, 1)));
//! assert_eq!(calc.history().len(), 1);
//! ```

pub mod calculation;
pub mod calculator;
pub mod command;
pub mod config;
pub mod display;
pub mod history;
pub mod logging;
pub mod operation;
pub mod parser;
#[cfg(feature = "plugins")]
pub mod plugin;

pub use calculation::Calculation;
pub use calculator::{Calculator, LineError};
pub use command::{
    Arg, Command, CommandContext, CommandEntry, CommandError, Invocation, Output, Registry,
    Signature,
};
pub use config::{ConfigError, Settings};
pub use history::{History, HistoryEntry, HistoryError};
pub use operation::{MathError, Operation, OperationArity};
pub use parser::{parse_line, ParseError, ParsedLine};
