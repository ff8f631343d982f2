//! FieldHub API response types
//!
//! Data structures for deserializing FieldHub form index and manifest
//! responses, and their conversions into the domain types the sync core
//! consumes.

use core_forms::source::{FormListItem, ManifestFile, MediaFile};
use serde::{Deserialize, Serialize};

/// FieldHub form index entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormListItemDto {
    /// Server-side form identifier
    pub form_id: String,

    /// Human-readable form title
    pub name: String,

    /// Form version (omitted for unversioned forms)
    #[serde(default)]
    pub version: Option<String>,

    /// Prefixed content hash (`md5:<hex>`)
    #[serde(default)]
    pub hash: Option<String>,

    /// Absolute URL of the form definition
    pub download_url: String,

    /// Absolute URL of the attachment manifest
    #[serde(default)]
    pub manifest_url: Option<String>,
}

impl From<FormListItemDto> for FormListItem {
    fn from(dto: FormListItemDto) -> Self {
        FormListItem {
            form_id: dto.form_id,
            name: dto.name,
            version: dto.version,
            hash: dto.hash,
            download_url: dto.download_url,
            manifest_url: dto.manifest_url,
        }
    }
}

/// FieldHub form index response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormListResponse {
    /// Every form the server offers
    pub forms: Vec<FormListItemDto>,
}

/// FieldHub attachment manifest response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResponse {
    /// Content hash of the manifest document
    #[serde(default)]
    pub hash: Option<String>,

    /// Attachments, in server order
    #[serde(default)]
    pub media_files: Vec<MediaFileDto>,
}

impl From<ManifestResponse> for ManifestFile {
    fn from(dto: ManifestResponse) -> Self {
        ManifestFile {
            hash: dto.hash,
            media_files: dto.media_files.into_iter().map(MediaFile::from).collect(),
        }
    }
}

/// One attachment entry of a manifest response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFileDto {
    /// Filename, relative to the form's media directory
    pub filename: String,

    /// Prefixed content hash (`md5:<hex>`)
    pub hash: String,

    /// Absolute URL of the attachment
    pub download_url: String,
}

impl From<MediaFileDto> for MediaFile {
    fn from(dto: MediaFileDto) -> Self {
        MediaFile {
            filename: dto.filename,
            hash: dto.hash,
            download_url: dto.download_url,
        }
    }
}
