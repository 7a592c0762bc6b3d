//! Fire-and-forget persistence on a background thread.
//!
//! The engine hands over snapshots and moves on. The worker owns the
//! database; when several snapshots are queued only the newest is written.
//! Failures are logged and dropped, never retried.

use std::thread::JoinHandle;

use chrono::{DateTime, Utc};
use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::engine::QuestState;
use crate::storage::database::Database;
use crate::storage::progress_store::ProgressStore;

struct Snapshot {
    state: Box<QuestState>,
    at: DateTime<Utc>,
}

/// Counts reported when the worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub written: usize,
    pub failed: usize,
    /// Snapshots superseded by a newer one before being written
    pub skipped: usize,
}

/// Background writer owning the database.
pub struct PersistenceWorker {
    sender: Option<Sender<Snapshot>>,
    handle: Option<JoinHandle<SyncReport>>,
}

impl PersistenceWorker {
    /// Start the writer thread.
    pub fn spawn(db: Database) -> Self {
        let (sender, receiver) = unbounded();
        let handle = std::thread::Builder::new()
            .name("careerquest-sync".to_string())
            .spawn(move || run(db, receiver))
            .map_err(|e| tracing::warn!("Failed to start persistence thread: {}", e))
            .ok();

        Self {
            sender: handle.as_ref().map(|_| sender),
            handle,
        }
    }

    /// Queue a snapshot. Never blocks; a dead worker just drops it.
    pub fn submit(&self, state: QuestState, at: DateTime<Utc>) {
        let Some(sender) = &self.sender else {
            tracing::warn!("Persistence worker not running; snapshot dropped");
            return;
        };
        let snapshot = Snapshot {
            state: Box::new(state),
            at,
        };
        if sender.send(snapshot).is_err() {
            tracing::warn!("Persistence worker stopped; snapshot dropped");
        }
    }

    /// Flush pending snapshots and stop the thread.
    pub fn shutdown(mut self) -> SyncReport {
        self.stop()
    }

    fn stop(&mut self) -> SyncReport {
        self.sender.take();
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(report)) => report,
            Some(Err(_)) => {
                tracing::warn!("Persistence thread panicked");
                SyncReport::default()
            }
            None => SyncReport::default(),
        }
    }
}

impl Drop for PersistenceWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(db: Database, receiver: Receiver<Snapshot>) -> SyncReport {
    let store = ProgressStore::new(db.connection());
    let mut report = SyncReport::default();

    while let Ok(mut snapshot) = receiver.recv() {
        for newer in receiver.try_iter() {
            snapshot = newer;
            report.skipped += 1;
        }

        match store.save(&snapshot.state, snapshot.at) {
            Ok(()) => report.written += 1,
            Err(e) => {
                tracing::warn!("Failed to persist progress: {}", e);
                report.failed += 1;
            }
        }
    }

    tracing::debug!(
        "Persistence worker stopped: {} written, {} failed, {} skipped",
        report.written,
        report.failed,
        report.skipped
    );
    report
}
