//! Workspace facade crate.
//!
//! Re-exports the Fieldwork core crates so host applications can depend on
//! `fieldwork-workspace` without wiring each member crate individually.
//! Platform adapters (`bridge-desktop`, or a host's own bridge
//! implementations) are wired separately by the embedding application.

pub use core_forms as forms;
pub use core_runtime as runtime;
pub use core_sync as sync;
