//! Scans the plugin directory and registers what it finds

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};

use super::manifest::PluginManifest;
use super::PluginError;
use crate::command::Registry;

const MANIFEST_FILE: &str = "plugin.toml";

/// Register every valid plugin under `plugin_dir` into `registry`.
///
/// Returns the names of the registered commands, in scan order. A missing
/// directory is not an error. Plugins may replace existing commands.
pub fn discover(plugin_dir: &Path, registry: &mut Registry) -> Result<Vec<String>, PluginError> {
    if !plugin_dir.is_dir() {
        tracing::debug!(dir = %plugin_dir.display(), "no plugin directory");
        return Ok(Vec::new());
    }

    let mut loaded = Vec::new();
    for path in scan(plugin_dir)? {
        let Some(name) = command_name(&path) else {
            tracing::warn!(path = %path.display(), "skipping plugin: name is not a valid command name");
            continue;
        };

        let entry = match PluginManifest::load(&path).and_then(|m| m.to_entry()) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping plugin");
                continue;
            }
        };

        if registry.register(name.clone(), entry).is_some() {
            tracing::info!(command = %name, "plugin replaces existing command");
        }
        tracing::info!(command = %name, path = %path.display(), "loaded plugin");
        loaded.push(name);
    }

    Ok(loaded)
}

/// Candidate manifests: `<dir>/*/plugin.toml` and `<dir>/*.toml`
fn scan(plugin_dir: &Path) -> Result<Vec<PathBuf>, PluginError> {
    let base = Pattern::escape(&plugin_dir.to_string_lossy());
    let mut candidates = Vec::new();

    for pattern in [format!("{}/*/{}", base, MANIFEST_FILE), format!("{}/*.toml", base)] {
        for item in glob(&pattern)? {
            match item {
                Ok(path) if path.is_file() => candidates.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "unreadable plugin path"),
            }
        }
    }

    candidates.sort();
    Ok(candidates)
}

/// Command name derived from a manifest's location: the directory name for
/// `<name>/plugin.toml`, the file stem otherwise. Dashes become underscores.
pub fn command_name(manifest_path: &Path) -> Option<String> {
    let source = if manifest_path.file_name().is_some_and(|n| n == MANIFEST_FILE) {
        manifest_path.parent()?.file_name()?
    } else {
        manifest_path.file_stem()?
    };

    let name = source.to_str()?.replace('-', "_");
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(name)
    } else {
        None
    }
}
