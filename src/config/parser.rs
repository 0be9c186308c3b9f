use crate::config::types::EngineConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates an [`EngineConfig`] from a TOML file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: EngineConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads an [`EngineConfig`] from a TOML file if one is given, otherwise
/// returns the built-in defaults. Either way the result passes through
/// [`validate`].
pub fn load_config_or_default(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = EngineConfig::default();
            validate(&config)?;
            Ok(config)
        }
    }
}
