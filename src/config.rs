//! Runtime settings
//!
//! Settings come from `PCALC_*` environment variables; the command line can
//! override them afterwards. Before reading them the binary loads
//! `.env.<environment>` from the working directory, where the environment
//! is `PCALC_ENV` (development by default). Variables already present in
//! the process environment win over the file.
//!
//! ```text
//! PCALC_ENV             environment name (development)
//! PCALC_HISTORY_FILE    default history file (history.csv)
//! PCALC_PLUGIN_DIR      plugin directory (~/.pcalc/plugins)
//! PCALC_LOG             log filter directive (warn)
//! PCALC_LOG_FILE        log to this file instead of stderr
//!                       (development: logs/development_calculator.log)
//! PCALC_BANNER          show the startup banner when set
//! ```

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_HISTORY_FILE: &str = "history.csv";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot load {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenv::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub environment: String,
    pub history_file: PathBuf,
    /// `None` disables plugin discovery
    pub plugin_dir: Option<PathBuf>,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
    pub banner: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            plugin_dir: default_plugin_dir(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: default_log_file(DEFAULT_ENVIRONMENT),
            banner: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();
        let environment = get("PCALC_ENV").unwrap_or(defaults.environment);

        Settings {
            log_file: get("PCALC_LOG_FILE")
                .map(PathBuf::from)
                .or_else(|| default_log_file(&environment)),
            environment,
            history_file: get("PCALC_HISTORY_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_file),
            plugin_dir: get("PCALC_PLUGIN_DIR")
                .map(PathBuf::from)
                .or(defaults.plugin_dir),
            log_filter: get("PCALC_LOG").unwrap_or(defaults.log_filter),
            banner: get("PCALC_BANNER").is_some(),
        }
    }
}

/// Environment name from `PCALC_ENV`
pub fn environment() -> String {
    env::var("PCALC_ENV")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// `.env.<environment>` inside `dir`
pub fn env_file_path(dir: &Path, environment: &str) -> PathBuf {
    dir.join(format!(".env.{}", environment))
}

/// Load `.env.<environment>` from `dir` into the process environment.
///
/// Returns the file's path when one was loaded. A missing file is not an
/// error. Variables that are already set keep their values.
pub fn load_env_file(dir: &Path, environment: &str) -> Result<Option<PathBuf>, ConfigError> {
    let path = env_file_path(dir, environment);
    if !path.is_file() {
        return Ok(None);
    }
    dotenv::from_path(&path).map_err(|source| ConfigError::EnvFile {
        path: path.clone(),
        source,
    })?;
    Ok(Some(path))
}

/// Variables defined in an env file, without touching the process environment
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let err = |source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    };
    dotenv::from_path_iter(path)
        .map_err(err)?
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(err)
}

/// Development logs to a per-environment file, everything else to stderr
fn default_log_file(environment: &str) -> Option<PathBuf> {
    (environment == DEFAULT_ENVIRONMENT)
        .then(|| PathBuf::from("logs").join(format!("{}_calculator.log", environment)))
}

/// Get home directory
pub fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// ~/.pcalc/plugins
fn default_plugin_dir() -> Option<PathBuf> {
    dirs_home().map(|h| h.join(".pcalc").join("plugins"))
}
