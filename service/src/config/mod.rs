//! Configuration loading for the RIMO builder
//!
//! This module loads [`RimoConfig`] from YAML files with environment
//! variable substitution support.

use regex::Regex;
use rimo_core::{Result, RimoConfig, RimoError};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/rimo.yaml";

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "RIMO_CONFIG";

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::(-)?([^}]*))?\}").expect("Valid env var pattern")
});

/// Load configuration from `YAML` file with environment variable substitution
///
/// # Errors
///
/// Returns `RimoError::IoError` if the file cannot be read
/// Returns `RimoError::ConfigError` if the YAML cannot be parsed
pub fn load_config<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RimoError::io_error(format!("Failed to read config {}: {e}", path.display()))
    })?;

    let substituted = substitute_env_vars(&contents);

    serde_yaml::from_str(&substituted)
        .map_err(|e| RimoError::config(format!("Failed to parse YAML config {}: {e}", path.display())))
}

/// Substitute environment variables in the format ${VAR:-default}
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(3).map_or("", |m| m.as_str());

            env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .to_string()
}

/// Configuration file to use when none is given explicitly
///
/// `RIMO_CONFIG` wins over [`DEFAULT_CONFIG_PATH`]; the default path is only
/// used if it exists.
#[must_use]
pub fn discover_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let default = PathBuf::from(DEFAULT_CONFIG_PATH);
    default.is_file().then_some(default)
}

/// Load and validate the configuration
///
/// With no explicit `path`, the discovered file is used, or the built-in
/// defaults if there is none.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if a value is
/// invalid.
pub fn load_rimo_config(path: Option<&Path>) -> Result<RimoConfig> {
    let path = path.map(Path::to_path_buf).or_else(discover_config_path);

    let config = match &path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            load_config::<RimoConfig>(path)?
        }
        None => {
            debug!("No configuration file, using built-in defaults");
            RimoConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}
