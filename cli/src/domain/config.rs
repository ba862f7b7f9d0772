//! Domain types and validators for runwatch configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "tracker.timeout_secs",
    "tracker.poll_interval_ms",
    "sampler.command",
    "sampler.fetch_timeout_secs",
];

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_SAMPLER_COMMAND: &str = "cf-app-stats";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.runwatch/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RunwatchConfig {
    /// Polling budget and cadence.
    pub tracker: TrackerSettings,
    /// How snapshots are fetched.
    pub sampler: SamplerSettings,
}

/// Polling budget and cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerSettings {
    /// Total time to wait for the application, in seconds.
    pub timeout_secs: u64,
    /// Delay between two snapshots, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl TrackerSettings {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// External command that prints one application snapshot as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SamplerSettings {
    /// Program and leading arguments; the application name is appended.
    pub command: String,
    /// Upper bound for a single fetch, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_SAMPLER_COMMAND.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl SamplerSettings {
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Split a sampler command line into program and arguments.
///
/// # Errors
///
/// Returns an error if the command is empty or whitespace only.
pub fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_owned);
    let program = parts.next().ok_or(ConfigError::EmptyCommand)?;
    Ok((program, parts.collect()))
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(unknown_key(key).into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "tracker.poll_interval_ms" | "sampler.fetch_timeout_secs" => {
            parse_positive(key, value)?;
        }
        "tracker.timeout_secs" => {
            parse_seconds(key, value)?;
        }
        "sampler.command" => {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyCommand.into());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Apply a validated `key = value` pair to `config`.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is invalid for it.
pub fn apply_config_value(config: &mut RunwatchConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "tracker.timeout_secs" => config.tracker.timeout_secs = parse_seconds(key, value)?,
        "tracker.poll_interval_ms" => config.tracker.poll_interval_ms = parse_positive(key, value)?,
        "sampler.command" => config.sampler.command = value.trim().to_string(),
        "sampler.fetch_timeout_secs" => {
            config.sampler.fetch_timeout_secs = parse_positive(key, value)?;
        }
        _ => return Err(unknown_key(key).into()),
    }
    Ok(())
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::UnknownKey {
        key: key.to_string(),
        valid: VALID_CONFIG_KEYS.join(", "),
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|_| invalid(key, value, "a whole number of seconds"))
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, value, "a whole number greater than 0")),
    }
}

fn invalid(key: &str, value: &str, valid: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
