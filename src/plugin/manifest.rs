//! Plugin manifest parsing
//!
//! A plugin is a TOML manifest describing one command in terms of an
//! existing operation:
//!
//! ```toml
//! [plugin]
//! version = "0.1.0"
//! description = "Halve a number"
//! requires = ">=0.1"
//!
//! [command]
//! operation = "divide"
//! operand = 2
//! ```
//!
//! `operand` fixes the right-hand operand of a binary operation, which turns
//! it into a one-argument command.

use rust_decimal::Decimal;
use semver::{Version, VersionReq};
use serde::Deserialize;
use std::path::Path;

use super::PluginError;
use crate::command::{bound_operation_entry, operation_entry, CommandEntry};
use crate::operation::{Operation, OperationArity};

#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    /// Plugin metadata
    #[serde(default)]
    pub plugin: PluginMeta,

    /// The command this plugin provides
    pub command: CommandSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginMeta {
    /// Plugin version (semver)
    #[serde(default)]
    pub version: Option<String>,

    /// Human-readable description, shown by `menu`
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    /// Version requirement on pcalc itself, e.g. ">=0.1"
    #[serde(default)]
    pub requires: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandSpec {
    /// Name of the operation to run
    pub operation: String,

    /// Fixed right-hand operand for binary operations
    #[serde(default)]
    pub operand: Option<Decimal>,
}

impl PluginManifest {
    /// Load a manifest from a TOML file
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, PluginError> {
        let manifest: PluginManifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Check the manifest against this build and produce its command entry
    pub fn to_entry(&self) -> Result<CommandEntry, PluginError> {
        self.check_requires(env!("CARGO_PKG_VERSION"))?;

        if let Some(version) = &self.plugin.version {
            Version::parse(version).map_err(|e| {
                PluginError::Manifest(format!("invalid version '{}': {}", version, e))
            })?;
        }

        let operation: Operation = self
            .command
            .operation
            .parse()
            .map_err(PluginError::Manifest)?;

        let mut entry = match (operation.arity(), self.command.operand) {
            (OperationArity::Binary, Some(operand)) => {
                let summary = format!("{}(x, {})", operation.name(), operand);
                bound_operation_entry(operation, operand, summary)
            }
            (OperationArity::Unary, Some(_)) => {
                return Err(PluginError::Manifest(format!(
                    "'{}' takes a single operand; remove 'operand'",
                    operation.name()
                )));
            }
            (_, None) => operation_entry(operation),
        };

        if !self.plugin.description.is_empty() {
            entry.summary = self.plugin.description.clone();
        }
        Ok(entry)
    }

    fn check_requires(&self, current: &str) -> Result<(), PluginError> {
        let Some(requires) = &self.plugin.requires else {
            return Ok(());
        };
        let req = VersionReq::parse(requires).map_err(|e| {
            PluginError::Manifest(format!("invalid version requirement '{}': {}", requires, e))
        })?;
        let ver = Version::parse(current)
            .map_err(|e| PluginError::Manifest(format!("invalid version '{}': {}", current, e)))?;
        if !req.matches(&ver) {
            return Err(PluginError::VersionMismatch {
                required: requires.clone(),
                found: current.to_string(),
            });
        }
        Ok(())
    }
}
