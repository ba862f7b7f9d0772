//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

use crate::application::services::run_state_probe::ProbeResult;
use crate::application::services::run_state_tracker::TrackOutcome;
use crate::domain::RunwatchConfig;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::{TerminalLog, TerminalProgress};
pub use styles::Styles;

/// Renders command results in the selected output mode.
pub enum Renderer<'a> {
    /// Human-readable terminal output.
    Human(HumanRenderer<'a>),
    /// Pretty-printed JSON on stdout.
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render how a `track` run ended. `None` means it was cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_track(&self, app_name: &str, outcome: Option<TrackOutcome>) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_track(app_name, outcome);
                Ok(())
            }
            Self::Json(r) => r.render_track(app_name, outcome),
        }
    }

    /// Render a one-shot probe.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_probe(&self, app_name: &str, probe: &ProbeResult) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_probe(app_name, probe);
                Ok(())
            }
            Self::Json(r) => r.render_probe(app_name, probe),
        }
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &RunwatchConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(r) => r.render_config(config, path),
        }
    }
}

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print a warning prefixed with `⚠` to stderr. Never suppressed.
    pub fn alert(&self, msg: &str) {
        eprintln!("  {} {msg}", "⚠".style(self.styles.warning));
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}
