//! Form library models

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An installed form definition.
///
/// A form is identified on the server by `form_id` plus an optional
/// `version`; `hash` is the bare hex content hash of the definition file as
/// installed, which is what sync compares against server-reported hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Form {
    /// Row id (UUID)
    pub id: String,

    /// Server-side form identifier
    pub form_id: String,

    /// Human-readable form title
    pub display_name: String,

    /// Form version as reported by the server, if any
    pub version: Option<String>,

    /// Bare hex content hash of the installed definition file
    pub hash: String,

    /// Absolute path of the installed definition file
    pub form_file_path: String,

    /// Unix seconds
    pub created_at: i64,

    /// Unix seconds
    pub updated_at: i64,
}

impl Form {
    /// Create a new form record with a fresh row id and current timestamps.
    pub fn new(
        form_id: impl Into<String>,
        display_name: impl Into<String>,
        version: Option<String>,
        hash: impl Into<String>,
        form_file_path: impl Into<String>,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            form_id: form_id.into(),
            display_name: display_name.into(),
            version,
            hash: hash.into(),
            form_file_path: form_file_path.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate required fields before persistence.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.form_id.trim().is_empty() {
            return Err("form_id must not be empty".to_string());
        }
        if self.hash.trim().is_empty() {
            return Err("hash must not be empty".to_string());
        }
        if self.form_file_path.trim().is_empty() {
            return Err("form_file_path must not be empty".to_string());
        }
        Ok(())
    }
}

/// A media attachment installed alongside a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LocalMediaFile {
    /// Filename as listed in the server manifest
    pub filename: String,

    /// Absolute path of the installed file
    pub path: String,

    /// Bare hex content hash of the installed file
    pub hash: String,
}
