//! Dispatcher
//!
//! [`Calculator`] owns the command registry and the history, resolves command
//! names and runs them.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::command::{
    Arg, CommandContext, CommandEntry, CommandError, Invocation, Output, Registry,
};
use crate::config::Settings;
use crate::history::History;
use crate::parser::{parse_line, ParseError};

/// Failure of a whole input line: either it didn't parse or the command failed
#[derive(Error, Debug)]
pub enum LineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

pub struct Calculator {
    registry: Registry,
    history: History,
    history_file: PathBuf,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Calculator with the builtin commands and the default history file
    pub fn new() -> Self {
        Calculator::with_registry(Registry::with_builtins(), crate::config::DEFAULT_HISTORY_FILE)
    }

    /// Calculator with the builtin commands, using the configured history file
    pub fn from_settings(settings: &Settings) -> Self {
        Calculator::with_registry(Registry::with_builtins(), &settings.history_file)
    }

    pub fn with_registry(registry: Registry, history_file: impl Into<PathBuf>) -> Self {
        Calculator {
            registry,
            history: History::new(),
            history_file: history_file.into(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn history_file(&self) -> &Path {
        &self.history_file
    }

    /// Bind `name` to `entry`, replacing any earlier binding
    pub fn register(&mut self, name: impl Into<String>, entry: CommandEntry) -> Option<CommandEntry> {
        self.registry.register(name, entry)
    }

    /// Look up `name`, check the argument count against its signature,
    /// construct the command and execute it.
    ///
    /// Errors from the command come back unchanged; they are logged with the
    /// command name first.
    pub fn dispatch(&mut self, name: &str, args: Vec<Arg>) -> Result<Output, CommandError> {
        let entry = self.registry.lookup(name).map_err(|e| {
            tracing::warn!(command = %name, "unknown command");
            e
        })?;

        let signature = entry.signature;
        if !signature.accepts(args.len()) {
            tracing::warn!(command = %name, expected = %signature, got = args.len(), "wrong number of arguments");
            return Err(CommandError::Arity {
                command: name.to_string(),
                expected: signature,
                got: args.len(),
            });
        }

        tracing::debug!(command = %name, args = ?args, "dispatching");

        let mut ctx = CommandContext {
            history: &mut self.history,
            registry: &self.registry,
            default_history_file: &self.history_file,
        };

        let result = match signature.invocation {
            Invocation::Construct => entry
                .construct(args)
                .and_then(|mut command| command.execute(&mut ctx, None)),
            Invocation::Operand => {
                let operand = args.into_iter().next();
                entry
                    .construct(Vec::new())
                    .and_then(|mut command| command.execute(&mut ctx, operand))
            }
        };

        result.map_err(|e| {
            tracing::warn!(command = %name, error = %e, "command failed");
            e
        })
    }

    /// Parse one line of input and dispatch it
    pub fn execute_line(&mut self, line: &str) -> Result<Output, LineError> {
        let parsed = parse_line(line)?;
        Ok(self.dispatch(&parsed.name, parsed.args)?)
    }
}
