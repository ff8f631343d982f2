//! Background sync task
//!
//! One lock-guarded synchronization pass, wired to observable status, the
//! host notifier, and the event bus. The host's scheduler decides *when* to
//! run it; this module only defines *what* a run does.

use bridge_traits::background::{BackgroundExecutor, TaskConstraints, TaskId};
use bridge_traits::notify::{Notifier, SyncOutcome};
use core_runtime::events::{CoreEvent, EventBus, SyncEvent};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::change_lock::ChangeLock;
use crate::status::SyncStatusTracker;
use crate::synchronizer::ServerFormsSynchronizer;

/// Stable scheduler id for the form sync task.
pub const SYNC_FORMS_TASK_ID: &str = "sync_forms";

/// Runs synchronization passes under the form change lock.
pub struct SyncFormsTask {
    synchronizer: Arc<ServerFormsSynchronizer>,
    status: SyncStatusTracker,
    notifier: Arc<dyn Notifier>,
    event_bus: EventBus,
    change_lock: ChangeLock,
}

impl SyncFormsTask {
    pub fn new(
        synchronizer: Arc<ServerFormsSynchronizer>,
        status: SyncStatusTracker,
        notifier: Arc<dyn Notifier>,
        event_bus: EventBus,
        change_lock: ChangeLock,
    ) -> Self {
        Self {
            synchronizer,
            status,
            notifier,
            event_bus,
            change_lock,
        }
    }

    /// Run one synchronization pass.
    ///
    /// When the change lock is already held the pass is skipped outright:
    /// no status mutation, no notification, no events — another pass is
    /// assumed to be doing the same work.
    ///
    /// Always returns `true` so host schedulers treat the run as handled
    /// even when it was skipped or failed; failures surface through the
    /// notifier and status tracker instead.
    #[instrument(skip(self))]
    pub async fn run(&self) -> bool {
        let Some(_guard) = self.change_lock.try_acquire() else {
            debug!("Another pass holds the form change lock, skipping");
            return true;
        };

        self.status.start_sync();
        self.event_bus.emit(CoreEvent::Sync(SyncEvent::Started)).ok();

        match self.synchronizer.synchronize().await {
            Ok(stats) => {
                info!(
                    forms_deleted = stats.forms_deleted,
                    forms_downloaded = stats.forms_downloaded,
                    "Sync pass completed"
                );
                self.status.finish_sync(None);
                self.event_bus
                    .emit(CoreEvent::Sync(SyncEvent::Completed {
                        forms_deleted: stats.forms_deleted,
                        forms_downloaded: stats.forms_downloaded,
                    }))
                    .ok();
                self.notifier.notify_sync(SyncOutcome::Success).await;
            }
            Err(err) => {
                error!(error = %err, "Sync pass failed");
                let message = err.to_string();
                self.status.finish_sync(Some(message.clone()));
                self.event_bus
                    .emit(CoreEvent::Sync(SyncEvent::Failed {
                        message: message.clone(),
                    }))
                    .ok();
                self.notifier
                    .notify_sync(SyncOutcome::Failure { message })
                    .await;
            }
        }

        true
    }

    /// Register this task with the host scheduler.
    ///
    /// The host maps [`SYNC_FORMS_TASK_ID`] back to [`run`](Self::run) when
    /// the schedule fires. Network is required; everything else is left to
    /// platform defaults.
    pub async fn schedule_periodic(
        &self,
        executor: &dyn BackgroundExecutor,
        interval: Duration,
    ) -> bridge_traits::error::Result<TaskId> {
        executor
            .schedule_task(
                SYNC_FORMS_TASK_ID,
                interval,
                TaskConstraints {
                    requires_network: true,
                    ..TaskConstraints::default()
                },
            )
            .await
    }
}
