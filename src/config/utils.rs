/// Configuration utilities - loading and saving
///
/// The loaded `Config` is returned to the caller and passed explicitly (see
/// `Session`); there is no process-wide configuration instance.
use super::schemas::Config;
use crate::errors::CoreError;
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from a specific file path
///
/// If the file doesn't exist, default values from the schema definitions are
/// used. An existing file that fails to parse or validate is an error.
///
/// # Example
/// ```no_run
/// use heliswap_core::config::load_config_from_path;
///
/// let config = load_config_from_path("data/config.toml").expect("valid config");
/// println!("Mirror node: {}", config.mirror_node.url);
/// ```
pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<Config, CoreError> {
    let path = path.as_ref();

    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        parse_config(&contents).map_err(|e| {
            CoreError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        Config::default()
    };

    config.validate().map_err(CoreError::Config)?;

    logger::debug(
        LogTag::Config,
        &format!("Loaded config, mirror node {}", config.mirror_node.url),
    );

    Ok(config)
}

/// Load configuration from the default path
pub fn load_config() -> Result<Config, CoreError> {
    load_config_from_path(CONFIG_FILE_PATH)
}

/// Parse configuration from TOML text
pub fn parse_config(contents: &str) -> Result<Config, String> {
    toml::from_str::<Config>(contents).map_err(|e| e.to_string())
}

/// Save a configuration to disk
pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), CoreError> {
    let path = path.as_ref();
    let config_str = toml::to_string_pretty(config)
        .map_err(|e| CoreError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, config_str).map_err(|e| {
        CoreError::Config(format!("Failed to write config file '{}': {}", path.display(), e))
    })?;

    Ok(())
}
