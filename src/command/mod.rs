//! Commands and their registry
//!
//! A command is anything implementing [`Command`]. Commands are registered
//! by name in a [`Registry`] together with a [`Signature`] describing how
//! many arguments they take and how the dispatcher hands those arguments
//! over:
//!
//! - [`Invocation::Construct`]: all arguments go to the constructor, then
//!   `execute` runs with no operand (`add(5, 3)`, `save_history(out.csv)`).
//! - [`Invocation::Operand`]: the command is constructed without arguments
//!   and the single argument is passed to `execute` (`sqrt(16)`).
//!
//! The dispatcher picks the convention from the signature alone, never
//! from the command's name.

mod builtins;
mod output;
mod registry;

pub use builtins::{
    bound_operation_entry, operation_entry, register_builtins, BinaryCommand, BoundCommand,
    ClearHistoryCommand, DisplayHistoryCommand, LastCalculationCommand, LoadHistoryCommand,
    MenuCommand, SaveHistoryCommand, UnaryCommand,
};
pub use output::Output;
pub use registry::{CommandEntry, CommandInfo, Constructor, Registry};

use crate::history::{History, HistoryError};
use crate::operation::MathError;
use rust_decimal::Decimal;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("{command} expects {expected} argument(s), got {got}")]
    Arity {
        command: String,
        expected: Signature,
        got: usize,
    },
    #[error("{command}: {message}")]
    InvalidArgument { command: String, message: String },
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// A positional argument from the command line.
///
/// Numbers keep the text they were written as, so an argument used as a
/// path (`save_history(2024.10)`) reaches the file system unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Number { value: Decimal, raw: String },
    Text(String),
}

impl Arg {
    /// Numeric argument written in canonical form
    pub fn number(value: Decimal) -> Self {
        Arg::Number {
            value,
            raw: value.to_string(),
        }
    }

    /// Classify a bare word: anything that parses as a number is one
    pub fn from_word(word: &str) -> Self {
        match Decimal::from_str(word).or_else(|_| Decimal::from_scientific(word)) {
            Ok(value) => Arg::Number {
                value,
                raw: word.to_string(),
            },
            Err(_) => Arg::Text(word.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Arg::Number { value, .. } => Some(*value),
            Arg::Text(_) => None,
        }
    }

    /// The argument as the user wrote it
    pub fn as_text(&self) -> &str {
        match self {
            Arg::Number { raw, .. } => raw,
            Arg::Text(s) => s,
        }
    }

    /// Numeric argument for `command`, or an `InvalidArgument` error
    pub(crate) fn number_for(&self, command: &str) -> Result<Decimal, CommandError> {
        self.as_number().ok_or_else(|| CommandError::InvalidArgument {
            command: command.to_string(),
            message: format!("'{}' is not a number", self),
        })
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl From<Decimal> for Arg {
    fn from(n: Decimal) -> Self {
        Arg::number(n)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

/// How the dispatcher delivers arguments to a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Construct,
    Operand,
}

/// Declared argument count and calling convention of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub min: usize,
    pub max: usize,
    pub invocation: Invocation,
}

impl Signature {
    /// Exactly `n` constructor arguments
    pub const fn construct(n: usize) -> Self {
        Signature {
            min: n,
            max: n,
            invocation: Invocation::Construct,
        }
    }

    /// Between `min` and `max` constructor arguments
    pub const fn construct_range(min: usize, max: usize) -> Self {
        Signature {
            min,
            max,
            invocation: Invocation::Construct,
        }
    }

    /// One argument passed to `execute`
    pub const fn operand() -> Self {
        Signature {
            min: 1,
            max: 1,
            invocation: Invocation::Operand,
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// What a command gets to see while it executes
pub struct CommandContext<'a> {
    pub history: &'a mut History,
    pub registry: &'a Registry,
    /// History file used when a history command gets no path
    pub default_history_file: &'a Path,
}

impl CommandContext<'_> {
    pub(crate) fn resolve_path(&self, path: Option<&PathBuf>) -> PathBuf {
        path.cloned()
            .unwrap_or_else(|| self.default_history_file.to_path_buf())
    }
}

/// A constructed command, ready to run
pub trait Command {
    /// Run the command. `operand` is `Some` only for [`Invocation::Operand`] commands.
    fn execute(
        &mut self,
        ctx: &mut CommandContext<'_>,
        operand: Option<Arg>,
    ) -> Result<Output, CommandError>;
}
