//! Observable sync status
//!
//! Host UIs watch this state to render a progress indicator and surface the
//! last failure. Backed by a `tokio::sync::watch` channel so subscribers
//! always see the latest snapshot without queueing.

use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot of the sync state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    /// A pass currently holds the change lock
    pub syncing: bool,
    /// Rendered error of the most recent failed pass, cleared on success
    pub last_failure: Option<String>,
}

/// Shared, observable sync state.
///
/// Cheap to clone; all clones update the same channel.
#[derive(Clone)]
pub struct SyncStatusTracker {
    tx: Arc<watch::Sender<SyncStatus>>,
}

impl SyncStatusTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SyncStatus::default());
        Self { tx: Arc::new(tx) }
    }

    /// Mark a pass as started. The previous failure stays visible until the
    /// pass finishes.
    pub fn start_sync(&self) {
        self.tx.send_modify(|status| status.syncing = true);
    }

    /// Mark the pass as finished; `failure` replaces the recorded error
    /// state (a successful pass clears it).
    pub fn finish_sync(&self, failure: Option<String>) {
        self.tx.send_modify(|status| {
            status.syncing = false;
            status.last_failure = failure;
        });
    }

    pub fn is_syncing(&self) -> bool {
        self.tx.borrow().syncing
    }

    pub fn last_failure(&self) -> Option<String> {
        self.tx.borrow().last_failure.clone()
    }

    /// Watch for status changes.
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.tx.subscribe()
    }
}

impl Default for SyncStatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
