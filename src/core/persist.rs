//! # Persistence Queue
//!
//! Fire-and-forget writes for slot and settings changes.
//!
//! ```text
//! update() ──Effect::Persist──▶ PersistQueue::save() ──mpsc──▶ worker task ──▶ KeyValueStore
//! ```
//!
//! A single worker drains the channel in order, so for any key the last
//! queued save is the one that lands. Failures are logged and dropped; the
//! in-memory state already changed and stays changed.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::selection::{SavedSelection, Slot, Variant};
use crate::core::store::{KeyValueStore, StoreError, load_or_none};

/// Storage keys for one navigator variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotKeys {
    pub level: &'static str,
    pub subject: &'static str,
    pub mode: Option<&'static str>,
    pub lesson: Option<&'static str>,
}

pub const BROWSER_KEYS: SlotKeys = SlotKeys {
    level: "SUBJECTS_SELECTED_LEVEL",
    subject: "SUBJECTS_SELECTED_SUBJECT",
    mode: Some("SUBJECTS_SELECTED_MODE"),
    lesson: None,
};

pub const QUIZ_KEYS: SlotKeys = SlotKeys {
    level: "QUIZ_SELECTED_LEVEL",
    subject: "QUIZ_SELECTED_SUBJECT",
    mode: None,
    lesson: Some("QUIZ_SELECTED_LESSON"),
};

impl SlotKeys {
    pub fn for_variant(variant: Variant) -> SlotKeys {
        match variant {
            Variant::Browser => BROWSER_KEYS,
            Variant::Quiz => QUIZ_KEYS,
        }
    }

    /// Storage key for a slot. The opened resource is never persisted.
    pub fn key(&self, slot: Slot) -> Option<&'static str> {
        match slot {
            Slot::Level => Some(self.level),
            Slot::Subject => Some(self.subject),
            Slot::Mode => self.mode,
            Slot::Lesson => self.lesson,
            Slot::Resource => None,
        }
    }
}

/// Read every persisted slot for a variant. Each key is loaded
/// independently; failures read as "not saved".
pub async fn load_saved_selection(store: &dyn KeyValueStore, keys: SlotKeys) -> SavedSelection {
    let mode = match keys.mode {
        Some(key) => load_or_none(store, key).await,
        None => None,
    };
    let lesson = match keys.lesson {
        Some(key) => load_or_none(store, key).await,
        None => None,
    };
    SavedSelection {
        level: load_or_none(store, keys.level).await,
        subject: load_or_none(store, keys.subject).await,
        mode,
        lesson,
    }
}

enum Job {
    Save { key: String, value: String },
    Clear { done: oneshot::Sender<Result<(), StoreError>> },
}

pub struct PersistQueue {
    tx: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
}

impl PersistQueue {
    /// Start the writer task. Must be called inside a tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        info!("Persistence worker started ({} store)", store.name());
        let worker = tokio::spawn(run_worker(store, rx));
        Self { tx, worker }
    }

    /// Queue a write. Never blocks.
    pub fn save(&self, key: impl Into<String>, value: impl Into<String>) {
        let job = Job::Save {
            key: key.into(),
            value: value.into(),
        };
        if self.tx.send(job).is_err() {
            warn!("Failed to queue save: persistence worker stopped");
        }
    }

    /// Queue a full clear, ordered after every save already queued.
    pub fn clear(&self) -> oneshot::Receiver<Result<(), StoreError>> {
        let (done, rx) = oneshot::channel();
        if self.tx.send(Job::Clear { done }).is_err() {
            warn!("Failed to queue clear: persistence worker stopped");
        }
        rx
    }

    /// Close the queue and wait for pending writes to land.
    pub async fn flush(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            warn!("Persistence worker ended abnormally: {}", e);
        }
    }
}

async fn run_worker(store: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = rx.recv().await {
        match job {
            Job::Save { key, value } => match store.save(&key, &value).await {
                Ok(()) => debug!("Persisted {}={}", key, value),
                Err(e) => warn!("Failed to persist '{}': {}", key, e),
            },
            Job::Clear { done } => {
                let result = store.clear().await;
                if let Err(ref e) = result {
                    warn!("Failed to clear {} store: {}", store.name(), e);
                }
                // Receiver may have gone away; the clear still happened.
                let _ = done.send(result);
            }
        }
    }
    debug!("Persistence worker drained");
}
