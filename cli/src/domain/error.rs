//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Tracking errors ───────────────────────────────────────────────────────────

/// Ways a tracking run can end without an outcome.
///
/// A timeout is not listed here: it is a normal outcome that still carries
/// the best-known run state.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The caller asked to stop. No warning is logged for this.
    #[error("Tracking cancelled.")]
    Cancelled,

    /// The sampler could not produce a snapshot. Never retried.
    ///
    /// The cause is reachable through `source()`; print with `{:#}` via
    /// `anyhow` to see the whole chain.
    #[error("Failed to fetch instance stats for '{app_name}'")]
    Remote {
        app_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl TrackError {
    /// Wrap a sampler failure for `app_name`.
    pub fn remote(app_name: &str, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Remote {
            app_name: app_name.to_string(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },

    #[error("Sampler command is empty. Set one with: runwatch config set sampler.command <program>")]
    EmptyCommand,
}
