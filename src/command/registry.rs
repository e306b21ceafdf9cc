//! Command registry
//!
//! Maps command names to constructors. Names are kept sorted so listings
//! are stable. Registering a name that already exists replaces the old
//! binding.

use std::collections::BTreeMap;
use std::fmt;

use super::{Arg, Command, CommandError, Signature};

/// Builds a command from its constructor arguments
pub type Constructor = Box<dyn Fn(Vec<Arg>) -> Result<Box<dyn Command>, CommandError>>;

/// A registered command: how to call it and how to build it
pub struct CommandEntry {
    pub signature: Signature,
    pub summary: String,
    constructor: Constructor,
}

impl CommandEntry {
    pub fn new<F>(signature: Signature, summary: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(Vec<Arg>) -> Result<Box<dyn Command>, CommandError> + 'static,
    {
        CommandEntry {
            signature,
            summary: summary.into(),
            constructor: Box::new(constructor),
        }
    }

    pub fn construct(&self, args: Vec<Arg>) -> Result<Box<dyn Command>, CommandError> {
        (self.constructor)(args)
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("signature", &self.signature)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// Name, signature and summary of a registered command (used by `menu`)
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInfo {
    pub name: String,
    pub signature: Signature,
    pub summary: String,
}

#[derive(Debug, Default)]
pub struct Registry {
    commands: BTreeMap<String, CommandEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registry holding the builtin command set
    pub fn with_builtins() -> Self {
        let mut registry = Registry::new();
        super::register_builtins(&mut registry);
        registry
    }

    /// Bind `name` to `entry`, returning the binding it replaced
    pub fn register(&mut self, name: impl Into<String>, entry: CommandEntry) -> Option<CommandEntry> {
        let name = name.into();
        tracing::debug!(command = %name, "registering command");
        self.commands.insert(name, entry)
    }

    pub fn unregister(&mut self, name: &str) -> Option<CommandEntry> {
        self.commands.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    /// Look up `name`, failing with `UnknownCommand`
    pub fn lookup(&self, name: &str) -> Result<&CommandEntry, CommandError> {
        self.get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn infos(&self) -> Vec<CommandInfo> {
        self.commands
            .iter()
            .map(|(name, entry)| CommandInfo {
                name: name.clone(),
                signature: entry.signature,
                summary: entry.summary.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
