//! Manifest file loading and validation.

use crate::error::ConfigError;
use crate::types::CircuitConfig;
use std::collections::HashSet;
use std::path::Path;

/// Loads and validates a circuit manifest from a TOML file.
pub fn load_config(path: &Path) -> Result<CircuitConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    log::debug!("loading circuit manifest {}", path.display());
    load_config_from_str(&content)
}

/// Parses and validates a circuit manifest from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CircuitConfig, ConfigError> {
    let config: CircuitConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that every instance has a non-empty kind and a unique, non-empty name.
fn validate_config(config: &CircuitConfig) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for module in &config.modules {
        if module.name.is_empty() {
            return Err(ConfigError::MissingField("module.name".to_string()));
        }
        if module.kind.is_empty() {
            return Err(ConfigError::MissingField(format!(
                "module.kind ({})",
                module.name
            )));
        }
        if !seen.insert(module.name.as_str()) {
            return Err(ConfigError::DuplicateModule(module.name.clone()));
        }
    }
    Ok(())
}
