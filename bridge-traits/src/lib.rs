//! # Host Bridge Traits
//!
//! Platform abstraction traits implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the Fieldwork core and
//! platform-specific adapters. Each trait is a capability the core needs but
//! that is provided differently per platform (desktop daemon, Android,
//! iOS):
//!
//! - [`HttpClient`](http::HttpClient) — async HTTP requests to the form server
//! - [`FileSystemAccess`](storage::FileSystemAccess) — form and media file storage
//! - [`BackgroundExecutor`](background::BackgroundExecutor) — periodic task scheduling under platform constraints
//! - [`Notifier`](notify::Notifier) — user-facing sync result presentation
//!
//! All traits require `Send + Sync` so they can be shared across async
//! tasks behind `Arc<dyn _>`. Adapters convert platform failures into
//! [`BridgeError`](error::BridgeError) with enough context to act on.

pub mod background;
pub mod error;
pub mod http;
pub mod notify;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use background::{BackgroundExecutor, TaskConstraints, TaskId};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use notify::{Notifier, SyncOutcome};
pub use storage::FileSystemAccess;
