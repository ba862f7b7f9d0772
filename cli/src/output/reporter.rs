//! Presentation-layer implementations of the `ProgressSink` and `LogSink`
//! ports.
//!
//! Application services emit progress and log records through the ports
//! without depending on any presentation type directly.

use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{LogSink, ProgressSink, Severity};
use crate::output::{OutputContext, progress};

/// Terminal progress bar driven by the tracker.
///
/// The bar is hidden when output is quiet or not a TTY; cancellation works
/// either way through the wrapped [`CancellationToken`].
pub struct TerminalProgress {
    bar: ProgressBar,
    cancel: CancellationToken,
}

impl TerminalProgress {
    #[must_use]
    pub fn new(ctx: &OutputContext, cancel: CancellationToken) -> Self {
        let bar = if ctx.show_progress() {
            progress::poll_bar()
        } else {
            ProgressBar::hidden()
        };
        Self { bar, cancel }
    }

    /// Handle used to print log lines without tearing the bar.
    #[must_use]
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Remove the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for TerminalProgress {
    fn begin(&self, description: &str, total_units: u64) {
        self.bar.set_length(total_units);
        self.bar.set_prefix(description.to_string());
    }

    fn set_status(&self, text: &str) {
        self.bar.set_message(text.to_string());
    }

    fn tick(&self, units: u64) {
        self.bar.inc(units);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }
}

/// Log sink that records every message as a `tracing` event and prints it
/// through the [`OutputContext`].
///
/// - `Info` prints `"  ℹ {message}"` (suppressed when `ctx.quiet`)
/// - `Warning` prints `"  ⚠ {message}"`, on stderr when `ctx.quiet`
/// - `Error` prints `"  ✗ {message}"` to stderr (never suppressed)
pub struct TerminalLog<'a> {
    ctx: &'a OutputContext,
    bar: Option<ProgressBar>,
}

impl<'a> TerminalLog<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx, bar: None }
    }

    /// Print above `bar` instead of over it.
    #[must_use]
    pub fn above(mut self, bar: &ProgressBar) -> Self {
        self.bar = Some(bar.clone());
        self
    }
}

impl LogSink for TerminalLog<'_> {
    fn record(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
        let print = || match severity {
            Severity::Info => self.ctx.info(message),
            Severity::Warning if self.ctx.quiet => self.ctx.alert(message),
            Severity::Warning => self.ctx.warn(message),
            Severity::Error => self.ctx.error(message),
        };
        match &self.bar {
            Some(bar) => bar.suspend(print),
            None => print(),
        }
    }
}
