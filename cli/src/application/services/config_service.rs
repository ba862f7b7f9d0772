//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{RunwatchConfig, apply_config_value};

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the stored configuration cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<RunwatchConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting, returning the
/// updated configuration.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<RunwatchConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
