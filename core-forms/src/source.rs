//! Remote form source contract
//!
//! A form server exposes a form index, per-form attachment manifests, and
//! download endpoints. Providers (e.g. `provider-fieldhub`) implement
//! [`FormSource`] over a concrete transport; the sync core only sees these
//! types.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::strip_hash_prefix;

/// One entry of the server's form index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormListItem {
    /// Server-side form identifier
    pub form_id: String,

    /// Human-readable form title
    pub name: String,

    /// Form version, if the server versions this form
    pub version: Option<String>,

    /// Prefixed content hash (`md5:<hex>`) of the definition file
    pub hash: Option<String>,

    /// Absolute URL of the form definition
    pub download_url: String,

    /// Absolute URL of the attachment manifest, if the form has one
    pub manifest_url: Option<String>,
}

impl FormListItem {
    /// The bare (unprefixed) content hash, if the server reported one.
    pub fn content_hash(&self) -> Option<&str> {
        self.hash.as_deref().map(strip_hash_prefix)
    }
}

/// A resolved attachment manifest for one form version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    /// Content hash of the manifest document itself
    pub hash: Option<String>,

    /// Ordered list of attachments
    pub media_files: Vec<MediaFile>,
}

/// One attachment listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Filename, relative to the form's media directory
    pub filename: String,

    /// Prefixed content hash (`md5:<hex>`)
    pub hash: String,

    /// Absolute URL of the attachment
    pub download_url: String,
}

impl MediaFile {
    /// The bare (unprefixed) content hash.
    pub fn content_hash(&self) -> &str {
        strip_hash_prefix(&self.hash)
    }
}

/// Failures reported by a form server provider.
///
/// Cloneable so a failed pass can be recorded in observable sync state while
/// the original travels to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormSourceError {
    #[error("Form server unreachable: {server_url}")]
    Unreachable { server_url: String },

    #[error("Authentication required by {server_url}")]
    AuthRequired { server_url: String },

    #[error("Form server error (status {status_code}) from {server_url}")]
    ServerError { status_code: u16, server_url: String },

    #[error("Failed to parse server response from {url}: {message}")]
    ParseError { url: String, message: String },
}

/// Remote form API.
///
/// `fetch_form_list` failures are fatal to a sync pass; manifest failures
/// are a per-form concern the caller may tolerate. Download endpoints return
/// raw bytes; content hashing happens on the caller's side.
#[async_trait]
pub trait FormSource: Send + Sync {
    /// Fetch the server's full form index.
    async fn fetch_form_list(&self) -> Result<Vec<FormListItem>, FormSourceError>;

    /// Fetch and parse the attachment manifest at `manifest_url`.
    async fn fetch_manifest(&self, manifest_url: &str) -> Result<ManifestFile, FormSourceError>;

    /// Download a form definition.
    async fn fetch_form(&self, download_url: &str) -> Result<Bytes, FormSourceError>;

    /// Download a media attachment.
    async fn fetch_media_file(&self, download_url: &str) -> Result<Bytes, FormSourceError>;
}
