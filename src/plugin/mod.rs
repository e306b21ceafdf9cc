//! Plugin discovery
//!
//! Plugins extend the command set without recompiling. Each plugin is a TOML
//! manifest in the plugin directory and contributes one command, named after
//! where the manifest lives:
//!
//! ```text
//! ~/.pcalc/plugins/
//! ├── half/
//! │   └── plugin.toml        # command `half`
//! └── double-it.toml         # command `double_it`
//! ```
//!
//! Anything that doesn't describe a valid command is skipped with a warning.

mod loader;
mod manifest;

pub use loader::{command_name, discover};
pub use manifest::{CommandSpec, PluginManifest, PluginMeta};

/// Error types for the plugin system
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plugin manifest error: {0}")]
    Manifest(String),

    #[error("Version mismatch: requires pcalc {required}, found {found}")]
    VersionMismatch { required: String, found: String },

    #[error("Invalid plugin path pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl From<toml::de::Error> for PluginError {
    fn from(e: toml::de::Error) -> Self {
        PluginError::Manifest(e.to_string())
    }
}
