//! # FieldHub Provider
//!
//! Implements the `FormSource` trait for FieldHub form servers.
//!
//! ## Overview
//!
//! This module provides:
//! - Form index listing (`GET {base}/formList`, JSON)
//! - Attachment manifest resolution by absolute URL
//! - Form definition and media downloads
//! - Bounded exponential backoff on 429/5xx and transport failures
//! - Optional bearer-token authentication via `HttpClient`

pub mod connector;
pub mod error;
pub mod types;

pub use connector::FieldHubConnector;
pub use error::{FieldHubError, Result};
