//! Visitor-progress reconciliation.
//!
//! The memory plugin only reports the visitor tasks currently on the village
//! board. Once a task is claimed it disappears from memory, so the last
//! persisted progress is merged back in:
//!
//! - a record present in the fresh snapshot always wins
//! - a saved record missing from the fresh snapshot survives only if it was
//!   finished (`COMPLETE` or `CLAIMED`), and is then marked `CLAIMED`
//! - any other saved record missing from the fresh snapshot was abandoned and
//!   is dropped

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::game::{TaskStatus, VisitorRecord};
use crate::storage::{PreferenceStore, PreferenceUpdate};

/// Merge freshly read visitor progress with the previously saved one.
///
/// Callers holding optional lists pass `as_deref().unwrap_or_default()`; a
/// missing list is the same as an empty one. A task id appears at most once
/// among the re-added saved records.
pub fn reconcile(from_memory: &[VisitorRecord], saved: &[VisitorRecord]) -> Vec<VisitorRecord> {
    let mut seen: HashSet<i32> = from_memory.iter().map(|v| v.task_id).collect();

    let mut result = from_memory.to_vec();
    result.extend(
        saved
            .iter()
            // Unfinished tasks missing from memory were abandoned
            .filter(|v| v.status.is_finished() && seen.insert(v.task_id))
            .map(|v| v.clone().with_status(TaskStatus::Claimed)),
    );
    result
}

/// Handle to a preference write queued on the background writer.
///
/// Dropping the handle detaches the write. Waiting on it surfaces the write's
/// result.
#[must_use = "dropping the handle detaches the write"]
pub struct PendingWrite {
    done: Receiver<Result<()>>,
    outcome: RefCell<Option<Result<()>>>,
}

impl PendingWrite {
    fn new(done: Receiver<Result<()>>) -> Self {
        Self {
            done,
            outcome: RefCell::new(None),
        }
    }

    /// Block until the write completes
    pub fn wait(self) -> Result<()> {
        if let Some(outcome) = self.outcome.into_inner() {
            return outcome;
        }
        self.done.recv().unwrap_or(Err(Error::WriterStopped))
    }

    pub fn is_finished(&self) -> bool {
        let mut outcome = self.outcome.borrow_mut();
        if outcome.is_some() {
            return true;
        }
        match self.done.try_recv() {
            Ok(result) => {
                *outcome = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                *outcome = Some(Err(Error::WriterStopped));
                true
            }
        }
    }
}

enum WriteRequest {
    Update {
        update: PreferenceUpdate,
        done: Sender<Result<()>>,
    },
    Flush {
        done: Sender<()>,
    },
}

/// Applies queued writes one at a time, in submission order
fn run_writer<S: PreferenceStore>(store: Arc<S>, requests: Receiver<WriteRequest>) {
    for request in requests {
        match request {
            WriteRequest::Update { update, done } => {
                let result = store.update(update);
                if let Err(e) = &result {
                    debug!("Preference write failed: {}", e);
                }
                // Receiver gone means the write was detached
                let _ = done.send(result);
            }
            WriteRequest::Flush { done } => {
                let _ = done.send(());
            }
        }
    }
    debug!("Preference writer stopped");
}

/// Reconciler bound to the preference store that receives merged progress.
///
/// All writes go through a single writer thread, so they land in the order
/// they were issued.
pub struct VisitorReconciler<S: PreferenceStore + 'static> {
    store: Arc<S>,
    writer: Sender<WriteRequest>,
}

impl<S: PreferenceStore + 'static> VisitorReconciler<S> {
    pub fn new(store: Arc<S>) -> Self {
        let (writer, requests) = mpsc::channel();
        let writer_store = Arc::clone(&store);
        thread::spawn(move || run_writer(writer_store, requests));
        Self { store, writer }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Block until every write issued so far has landed
    pub fn flush(&self) -> Result<()> {
        let (done, flushed) = mpsc::channel();
        self.writer
            .send(WriteRequest::Flush { done })
            .map_err(|_| Error::WriterStopped)?;
        flushed.recv().map_err(|_| Error::WriterStopped)
    }

    /// Merge and queue the result for persistence without waiting for the write
    pub fn reconcile_and_persist(
        &self,
        from_memory: &[VisitorRecord],
        saved: &[VisitorRecord],
    ) -> (Vec<VisitorRecord>, PendingWrite) {
        let merged = reconcile(from_memory, saved);
        debug!(
            "Reconciled visitors: {} from memory, {} saved -> {} merged",
            from_memory.len(),
            saved.len(),
            merged.len()
        );

        let (done, written) = mpsc::channel();
        let update = PreferenceUpdate::MercenariesVisitorsProgress(merged.clone());
        if self
            .writer
            .send(WriteRequest::Update { update, done })
            .is_err()
        {
            // The dropped request closes `written`, so waiting reports the failure
            warn!("Preference writer stopped, visitor progress not saved");
        }

        (merged, PendingWrite::new(written))
    }
}
