//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{EngineConfig, MAX_CELL_WIDTH};
use std::path::Path;

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration document from a string.
pub fn load_config_from_str(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks patterns compile and values are in range.
///
/// Runtime components compile the same patterns again and skip any that fail, so a config that
/// bypassed this check degrades instead of failing.
pub fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    for (idx, pattern) in config.filter.ignore_paths.iter().enumerate() {
        glob::Pattern::new(pattern).map_err(|e| {
            ConfigError::ValidationError(format!(
                "filter.ignore_paths[{idx}]: invalid glob '{pattern}': {e}"
            ))
        })?;
    }

    for (idx, rule) in config.filter.suppress.iter().enumerate() {
        if rule.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "filter.suppress[{idx}] must set at least one of source, code, message"
            )));
        }
        if let Some(message) = &rule.message {
            regex::Regex::new(message).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "filter.suppress[{idx}].message: invalid regex: {e}"
                ))
            })?;
        }
    }

    let cell_width = config.statuscolumn.cell_width;
    if !(1..=MAX_CELL_WIDTH).contains(&cell_width) {
        return Err(ConfigError::ValidationError(format!(
            "statuscolumn.cell_width must be between 1 and {MAX_CELL_WIDTH}, got {cell_width}"
        )));
    }

    Ok(())
}
