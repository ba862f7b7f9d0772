//! Terminal indicators for `track` (poll bar) and `state` (fetch spinner).

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const POLL_TEMPLATE: &str = "  {prefix}\n    {bar:40.cyan/dim} {pos}/{len} polls  {msg}";
const FETCH_TEMPLATE: &str = "{spinner:.cyan} Fetching instances of {prefix}...";

/// Bar counting poll attempts. The tracker sets its length and prefix once
/// the poll budget is known.
#[must_use]
pub fn poll_bar() -> ProgressBar {
    let style = ProgressStyle::with_template(POLL_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━─");
    ProgressBar::new(0).with_style(style)
}

/// Spinner shown while `state` waits on a single snapshot of `app`.
#[must_use]
pub fn fetch_spinner(app: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(FETCH_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = ProgressBar::new_spinner()
        .with_style(style)
        .with_prefix(app.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Replace the fetch spinner with a one-line verdict.
pub fn settle_fetch(pb: &ProgressBar, fetched: bool) {
    let style =
        ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    let verdict = if fetched {
        format!("✓ Fetched instances of {}", pb.prefix())
    } else {
        format!("✗ Fetch failed for {}", pb.prefix())
    };
    pb.finish_with_message(verdict);
}
