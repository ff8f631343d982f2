//! User Notification Abstraction
//!
//! The core reports sync outcomes; how they are presented (system
//! notification, status bar, toast) is entirely the host's business.

use async_trait::async_trait;

/// Outcome of one synchronization pass, as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The pass completed and local state matches the server.
    Success,
    /// The pass failed; `message` is the rendered error for presentation.
    Failure { message: String },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Success)
    }
}

/// Notification sink for sync results
///
/// Invoked once per completed (not skipped) sync pass. Implementations must
/// not block the sync worker for long; presentation work should be handed
/// off to the host's UI machinery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Report the outcome of a synchronization pass.
    async fn notify_sync(&self, outcome: SyncOutcome);
}
