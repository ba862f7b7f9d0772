//! Shared mock ports for unit tests.

#![allow(clippy::expect_used, dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use runwatch_cli::application::ports::{ConfigStore, LogSink, ProgressSink, Sampler, Severity};
use runwatch_cli::domain::RunwatchConfig;
use runwatch_common::{ApplicationSnapshot, DesiredState, RawInstanceState};

// ── Snapshot helpers ──────────────────────────────────────────────────────────

pub fn started(instances: &[RawInstanceState]) -> ApplicationSnapshot {
    ApplicationSnapshot::new(DesiredState::Started, instances.to_vec())
}

pub fn stopped() -> ApplicationSnapshot {
    ApplicationSnapshot::new(DesiredState::Stopped, Vec::new())
}

// ── Sampler ───────────────────────────────────────────────────────────────────

/// One scripted answer of [`ScriptedSampler`].
#[derive(Clone)]
pub enum Step {
    /// Return the snapshot immediately.
    Snapshot(ApplicationSnapshot),
    /// Fail with the given message.
    Fail(&'static str),
    /// Return the snapshot after sleeping on the tokio clock.
    Slow(Duration, ApplicationSnapshot),
}

/// Sampler that plays back a fixed script; the last step repeats forever.
pub struct ScriptedSampler {
    steps: Vec<Step>,
    calls: AtomicUsize,
    apps: Mutex<Vec<String>>,
}

impl ScriptedSampler {
    pub fn new(steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            steps,
            calls: AtomicUsize::new(0),
            apps: Mutex::new(Vec::new()),
        }
    }

    /// Sampler that always returns `snapshot`.
    pub fn always(snapshot: ApplicationSnapshot) -> Self {
        Self::new(vec![Step::Snapshot(snapshot)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn apps(&self) -> Vec<String> {
        self.apps.lock().expect("lock").clone()
    }
}

impl Sampler for ScriptedSampler {
    async fn fetch_snapshot(&self, app_name: &str) -> Result<ApplicationSnapshot> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.apps.lock().expect("lock").push(app_name.to_string());
        let step = self.steps[n.min(self.steps.len() - 1)].clone();
        match step {
            Step::Snapshot(snapshot) => Ok(snapshot),
            Step::Fail(msg) => anyhow::bail!("{msg}"),
            Step::Slow(delay, snapshot) => {
                tokio::time::sleep(delay).await;
                Ok(snapshot)
            }
        }
    }
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Progress sink backed by a plain flag; relies on the default polling
/// `cancelled()`.
#[derive(Default)]
pub struct FlagProgress {
    cancelled: AtomicBool,
    ticks: AtomicU64,
    total: AtomicU64,
    statuses: Mutex<Vec<String>>,
}

impl FlagProgress {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().expect("lock").clone()
    }
}

impl ProgressSink for FlagProgress {
    fn begin(&self, _: &str, total_units: u64) {
        self.total.store(total_units, Ordering::SeqCst);
    }

    fn set_status(&self, text: &str) {
        self.statuses.lock().expect("lock").push(text.to_string());
    }

    fn tick(&self, units: u64) {
        self.ticks.fetch_add(units, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ── Log ───────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingLog {
    records: Mutex<Vec<(String, Severity)>>,
}

impl RecordingLog {
    pub fn records(&self) -> Vec<(String, Severity)> {
        self.records.lock().expect("lock").clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(_, s)| *s == severity)
            .map(|(m, _)| m)
            .collect()
    }
}

impl LogSink for RecordingLog {
    fn record(&self, message: &str, severity: Severity) {
        self.records
            .lock()
            .expect("lock")
            .push((message.to_string(), severity));
    }
}

// ── Config store ──────────────────────────────────────────────────────────────

/// In-memory `ConfigStore`; `None` behaves like a missing file.
#[derive(Default)]
pub struct MemoryConfigStore {
    stored: RefCell<Option<RunwatchConfig>>,
    saves: RefCell<usize>,
}

impl MemoryConfigStore {
    pub fn with(config: RunwatchConfig) -> Self {
        Self {
            stored: RefCell::new(Some(config)),
            saves: RefCell::new(0),
        }
    }

    pub fn stored(&self) -> Option<RunwatchConfig> {
        self.stored.borrow().clone()
    }

    pub fn saves(&self) -> usize {
        *self.saves.borrow()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<RunwatchConfig> {
        Ok(self.stored.borrow().clone().unwrap_or_default())
    }

    fn save(&self, config: &RunwatchConfig) -> Result<()> {
        *self.stored.borrow_mut() = Some(config.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/tmp/runwatch-test/config.yaml"))
    }
}
