//! # Form Synchronization Module
//!
//! Compares server form state against the local form library and brings the
//! library up to date.
//!
//! ## Overview
//!
//! One sync pass flows top-down through this crate:
//!
//! - **Sync Task** (`task`): acquires the form [`ChangeLock`], tracks
//!   observable status, notifies the host, emits events
//! - **Synchronizer** (`synchronizer`): match-exactly reconciliation —
//!   delete what the server dropped, download what is new or updated
//! - **Details Fetcher** (`server_forms`): per-form diff of server hashes
//!   and manifests against installed forms and media mirrors
//! - **Downloader** (`downloader`): installs a form definition and its
//!   media attachments
//!
//! A failure to fetch the server's form index aborts the pass; a failure to
//! fetch one form's manifest only degrades that form's diff (the manifest is
//! treated as absent) and the pass continues.

pub mod change_lock;
pub mod downloader;
pub mod error;
pub mod server_forms;
pub mod status;
pub mod synchronizer;
pub mod task;

pub use change_lock::{ChangeLock, ChangeLockGuard};
pub use downloader::{FormDownloader, ServerFormDownloader};
pub use error::{Result, SyncError};
pub use server_forms::{ServerFormDetails, ServerFormsDetailsFetcher};
pub use status::{SyncStatus, SyncStatusTracker};
pub use synchronizer::{ServerFormsSynchronizer, SyncStats};
pub use task::{SyncFormsTask, SYNC_FORMS_TASK_ID};
