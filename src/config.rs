//! Configuration handling for escape-fix.
//! This module provides functionality for loading the optional per-corpus
//! configuration file, trying multiple formats before falling back to
//! built-in defaults.

use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Supported configuration file names, tried in order at the corpus root
pub const CONFIG_FILES: [&str; 3] = ["escapefix.json", "escapefix.yml", "escapefix.yaml"];

/// Begin marker inserted immediately before a conflicting fence
pub const DEFAULT_BEGIN_MARKER: &str = "{% raw %}";

/// End marker inserted immediately after a conflicting fence
pub const DEFAULT_END_MARKER: &str = "{% endraw %}";

/// File extensions processed when the configuration does not override them
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdx"];

/// Tool configuration.
///
/// Every field is optional in the file; missing fields take the defaults
/// below, and a missing file means an all-default configuration. The
/// `exclude` list is the operator's escape hatch for reviewed false
/// positives: paths matching any of these globs are never touched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Marker line placed before the opening fence of an escaped region
    pub begin_marker: String,

    /// Marker line placed after the closing fence of an escaped region
    pub end_marker: String,

    /// File extensions to process
    pub extensions: Vec<String>,

    /// Glob patterns (relative to the corpus root) excluded from processing
    pub exclude: Vec<String>,

    /// Shell command invoked by `--validate-build`
    pub build_command: Option<String>,

    /// Timeout for the build command, in seconds
    pub build_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            begin_marker: DEFAULT_BEGIN_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude: Vec::new(),
            build_command: None,
            build_timeout_secs: 300,
        }
    }
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Arguments
/// * `content` - Raw configuration content as string
///
/// # Returns
/// * `Result<Config>` - Parsed configuration
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e))),
    }
}

/// Loads the configuration for a corpus.
///
/// When `explicit_path` is given, that file must exist and parse. Otherwise
/// the files in [`CONFIG_FILES`] are tried in order at the corpus root, and
/// if none exists the built-in defaults are returned.
///
/// # Arguments
/// * `root_dir` - Corpus root directory
/// * `explicit_path` - Configuration file passed via `--config`, if any
///
/// # Errors
/// * `Error::ConfigError` if an explicit file is missing or any found file
///   fails to parse
pub fn get_config(root_dir: &Path, explicit_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            return Err(Error::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        return parse_config(&content);
    }

    for file in CONFIG_FILES {
        let config_path = root_dir.join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            return parse_config(&content);
        }
    }

    debug!("No configuration file found (tried: {}), using defaults", CONFIG_FILES.join(", "));
    Ok(Config::default())
}
