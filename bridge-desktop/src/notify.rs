//! Notifier Implementation backed by tracing
//!
//! Desktop builds have no system notification surface wired up; sync
//! outcomes are reported through the log stream instead.

use async_trait::async_trait;
use bridge_traits::notify::{Notifier, SyncOutcome};
use tracing::{error, info};

/// Log-based notifier for desktop hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_sync(&self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Success => info!("Form synchronization completed"),
            SyncOutcome::Failure { message } => {
                error!(message = %message, "Form synchronization failed")
            }
        }
    }
}
