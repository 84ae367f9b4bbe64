// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Debounced reconciliation of externally modified documents.
//!
//! Editors save often; reconciling on every save would rewrite the document
//! under the user's cursor. Each modification notice (re)starts a timer for
//! that document and only the last one in a burst triggers a sync.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::services::WorkoutFileService;
use crate::storage::{is_markdown, DocumentHandle, DocumentStore};

/// A scheduled sync for one document.
struct PendingSync {
    generation: u64,
    task: JoinHandle<()>,
}

/// Pending syncs keyed by document path.
type PendingSyncs = Arc<DashMap<String, PendingSync>>;

/// Trailing-edge debouncer for document syncs.
///
/// Pending syncs are aborted by [`SyncScheduler::shutdown`] or when the
/// scheduler is dropped. Must be used from within a tokio runtime.
pub struct SyncScheduler<S: DocumentStore + 'static> {
    service: Arc<WorkoutFileService<S>>,
    delay: Duration,
    pending: PendingSyncs,
    next_generation: AtomicU64,
}

impl<S: DocumentStore + 'static> SyncScheduler<S> {
    pub fn new(service: Arc<WorkoutFileService<S>>, delay: Duration) -> Self {
        Self {
            service,
            delay,
            pending: Arc::new(DashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Scheduler using the configured delay, or `None` when auto-sync is
    /// disabled.
    pub fn from_config(service: Arc<WorkoutFileService<S>>, config: &Config) -> Option<Self> {
        config
            .enable_auto_sync
            .then(|| Self::new(service, config.auto_sync_delay()))
    }

    /// Record that a document changed. Any sync already pending for the same
    /// path is cancelled and rescheduled.
    pub fn notify_modified(&self, path: &str) {
        if !is_markdown(path) {
            return;
        }

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);

        // Spawn while holding the entry so the task cannot finish and remove
        // itself before it is recorded
        match self.pending.entry(path.to_string()) {
            Entry::Occupied(mut entry) => {
                let task = self.spawn_sync(path, generation);
                let previous = entry.insert(PendingSync { generation, task });
                previous.task.abort();
                tracing::debug!(path, "Rescheduled pending sync");
            }
            Entry::Vacant(entry) => {
                let task = self.spawn_sync(path, generation);
                entry.insert(PendingSync { generation, task });
            }
        }
    }

    fn spawn_sync(&self, path: &str, generation: u64) -> JoinHandle<()> {
        let service = self.service.clone();
        let pending = self.pending.clone();
        let delay = self.delay;
        let key = path.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sync_document(&service, &key).await;
            pending.remove_if(&key, |_, p| p.generation == generation);
        })
    }

    /// Number of syncs waiting to run.
    pub fn pending_count(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| !p.task.is_finished())
            .count()
    }

    /// Cancel every pending sync.
    pub fn shutdown(&self) {
        self.pending.retain(|path, p| {
            if !p.task.is_finished() {
                tracing::debug!(path = %path, "Cancelled pending sync");
            }
            p.task.abort();
            false
        });
    }
}

impl<S: DocumentStore + 'static> Drop for SyncScheduler<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn sync_document<S: DocumentStore>(service: &WorkoutFileService<S>, path: &str) {
    if !service.is_workout_file(path).await {
        return;
    }

    match service.sync_file(&DocumentHandle::new(path)).await {
        Ok(true) => tracing::info!(path, "Auto-synced frontmatter"),
        Ok(false) => tracing::debug!(path, "Workout already in sync"),
        Err(e) => tracing::error!(path, error = %e, "Error syncing frontmatter"),
    }
}
