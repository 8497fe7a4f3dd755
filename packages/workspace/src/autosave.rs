//! Debounced auto-save.
//!
//! ```text
//! Engine ──dispatch──▶ AutoSaveHandle (observer)
//!                          │ snapshot (Arc<Document>, revision)
//!                          ▼
//!                     AutoSave task ──timer──▶ DocumentStore
//!                          │
//!                          ▼ SaveReport
//!                     apply_reports ──MARK_SAVED──▶ Engine
//! ```
//!
//! Each change re-arms the debounce timer. A steady stream of changes still
//! gets saved once `max_delay_ms` has passed since the first unsaved one.
//! Only the latest snapshot is written.

use crate::error::PersistenceError;
use crate::persist::save_document;
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};
use sitecraft_editor::{document_changed, Action, BuilderState, Engine, StateObserver};
use sitecraft_model::Document;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoSaveConfig {
    pub enabled: bool,

    /// Quiet period after the last change before saving
    pub debounce_ms: u64,

    /// Upper bound on how long a change can stay unsaved
    pub max_delay_ms: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 1000,
            max_delay_ms: 30_000,
        }
    }
}

impl AutoSaveConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

/// Outcome of one background write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveReport {
    Saved { revision: u64 },
    Failed { revision: u64, error: String },
}

pub type SaveReports = mpsc::UnboundedReceiver<SaveReport>;

#[derive(Debug)]
struct Snapshot {
    document: Arc<Document>,
    revision: u64,
}

#[derive(Debug)]
enum Command {
    Changed(Snapshot),
    Flush,
    Shutdown,
}

/// Observer side of the auto-save task
///
/// Clones talk to the same task. The task stops, after writing anything
/// pending, on [`AutoSaveHandle::shutdown`] or once every handle is dropped.
#[derive(Debug, Clone)]
pub struct AutoSaveHandle {
    commands: Option<mpsc::UnboundedSender<Command>>,
}

impl AutoSaveHandle {
    /// Write the pending snapshot now instead of waiting for the timer
    pub fn flush(&self) {
        self.send(Command::Flush);
    }

    /// Write the pending snapshot and stop the task
    pub fn shutdown(&self) {
        self.send(Command::Shutdown);
    }

    pub fn is_enabled(&self) -> bool {
        self.commands.is_some()
    }

    fn send(&self, command: Command) {
        if let Some(commands) = &self.commands {
            if commands.send(command).is_err() {
                tracing::debug!("Auto-save task already stopped");
            }
        }
    }
}

impl StateObserver for AutoSaveHandle {
    fn state_changed(&mut self, previous: &BuilderState, current: &BuilderState) {
        if document_changed(previous, current) && current.dirty {
            self.send(Command::Changed(Snapshot {
                document: Arc::clone(&current.document),
                revision: current.revision,
            }));
        }
    }
}

/// Background writer state
pub struct AutoSave {
    store: Arc<dyn DocumentStore>,
    config: AutoSaveConfig,
    reports: mpsc::UnboundedSender<SaveReport>,
    pending: Option<Snapshot>,
    first_unsaved: Option<Instant>,
    deadline: Option<Instant>,
}

impl AutoSave {
    /// Start the auto-save task on the current tokio runtime
    ///
    /// With auto-save disabled no task is started; the handle ignores
    /// changes and the report receiver never yields.
    pub fn spawn(
        store: Arc<dyn DocumentStore>,
        config: AutoSaveConfig,
    ) -> (AutoSaveHandle, SaveReports) {
        let (reports_tx, reports_rx) = mpsc::unbounded_channel();

        if !config.enabled {
            return (AutoSaveHandle { commands: None }, reports_rx);
        }

        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let task = AutoSave {
            store,
            config,
            reports: reports_tx,
            pending: None,
            first_unsaved: None,
            deadline: None,
        };
        tokio::spawn(task.run(commands_rx));

        (
            AutoSaveHandle {
                commands: Some(commands_tx),
            },
            reports_rx,
        )
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            let command = match self.deadline {
                Some(deadline) => {
                    tokio::select! {
                        command = commands.recv() => command,
                        _ = sleep_until(deadline) => {
                            self.write_pending().await;
                            continue;
                        }
                    }
                }
                None => commands.recv().await,
            };

            match command {
                Some(Command::Changed(snapshot)) => self.schedule(snapshot),
                Some(Command::Flush) => self.write_pending().await,
                Some(Command::Shutdown) | None => {
                    self.write_pending().await;
                    break;
                }
            }
        }
        tracing::debug!("Auto-save task stopped");
    }

    fn schedule(&mut self, snapshot: Snapshot) {
        let now = Instant::now();
        let first = *self.first_unsaved.get_or_insert(now);
        self.deadline = Some((now + self.config.debounce()).min(first + self.config.max_delay()));
        self.pending = Some(snapshot);
    }

    async fn write_pending(&mut self) {
        self.deadline = None;
        self.first_unsaved = None;
        let Some(snapshot) = self.pending.take() else {
            return;
        };

        let revision = snapshot.revision;
        let store = Arc::clone(&self.store);
        let result =
            tokio::task::spawn_blocking(move || save_document(store.as_ref(), &snapshot.document))
                .await
                .unwrap_or_else(|e| Err(PersistenceError::Interrupted(e.to_string())));

        let report = match result {
            Ok(()) => SaveReport::Saved { revision },
            Err(e) => {
                tracing::warn!("Auto-save of revision {} failed: {}", revision, e);
                SaveReport::Failed {
                    revision,
                    error: e.to_string(),
                }
            }
        };

        // Nobody listening is fine; the document is on disk either way
        let _ = self.reports.send(report);
    }
}

/// Dispatch `MARK_SAVED` for a successful save
pub fn acknowledge(engine: &mut Engine, report: &SaveReport) {
    if let SaveReport::Saved { revision } = report {
        engine.dispatch(Action::MarkSaved {
            revision: *revision,
        });
    }
}

/// Acknowledge every report already received, without blocking
pub fn apply_reports(engine: &mut Engine, reports: &mut SaveReports) -> Vec<SaveReport> {
    let mut drained = Vec::new();
    while let Ok(report) = reports.try_recv() {
        acknowledge(engine, &report);
        drained.push(report);
    }
    drained
}
