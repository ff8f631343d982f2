//! Background Execution and Task Scheduling
//!
//! Platform-aware scheduling for recurring core tasks (form sync). The host
//! owns the scheduler; the core only registers task ids and constraints.
//! Retry and backoff of whole passes, if any, also live host-side.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Task execution constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConstraints {
    /// Require any network connection
    pub requires_network: bool,
    /// Require an unmetered (WiFi) connection
    pub requires_wifi: bool,
    /// Require device to be charging
    pub requires_charging: bool,
}

impl Default for TaskConstraints {
    fn default() -> Self {
        Self {
            requires_network: true,
            requires_wifi: false,
            requires_charging: false,
        }
    }
}

/// Scheduled task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Background task executor trait
///
/// Abstracts platform task schedulers (WorkManager, BGTaskScheduler, a
/// desktop daemon timer). Scheduling is by stable string id: registering the
/// same id again replaces the previous schedule. Actual firing times are
/// system-determined within the given interval and constraints.
#[async_trait]
pub trait BackgroundExecutor: Send + Sync {
    /// Schedule a recurring task
    ///
    /// # Arguments
    ///
    /// * `task_id` - Stable identifier the host maps to a core task
    /// * `interval` - Target period between runs
    /// * `constraints` - Execution constraints (network, charging)
    async fn schedule_task(
        &self,
        task_id: &str,
        interval: Duration,
        constraints: TaskConstraints,
    ) -> Result<TaskId>;

    /// Cancel a scheduled task
    async fn cancel_task(&self, task_id: &TaskId) -> Result<()>;

    /// Check if background execution is available on this platform
    async fn is_available(&self) -> bool {
        true
    }
}
