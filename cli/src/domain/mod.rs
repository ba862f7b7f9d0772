//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.
//! Run-state types themselves live in `runwatch-common`.

pub mod config;
pub mod error;

pub use config::{
    RunwatchConfig, SamplerSettings, TrackerSettings, apply_config_value, split_command,
    validate_config_key, validate_config_value,
};
pub use error::{ConfigError, TrackError};
