//! # Desktop Bridge Adapters
//!
//! Desktop implementations of the `bridge-traits` contracts:
//!
//! - [`ReqwestHttpClient`] — HTTP via reqwest with rustls
//! - [`TokioFileSystem`] — file I/O via `tokio::fs` under XDG directories
//! - [`LogNotifier`] — sync outcome reporting through `tracing`
//!
//! Mobile hosts ship their own adapter crates; nothing here is referenced
//! from the core directly.

pub mod filesystem;
pub mod http;
pub mod notify;

pub use filesystem::TokioFileSystem;
pub use http::ReqwestHttpClient;
pub use notify::LogNotifier;
