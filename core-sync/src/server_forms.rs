//! Server form details fetching
//!
//! Builds one [`ServerFormDetails`] per form the server offers by diffing
//! the server's form index and attachment manifests against the installed
//! form library and media mirrors.

use core_forms::models::LocalMediaFile;
use core_forms::repositories::{FormsRepository, MediaFileRepository};
use core_forms::source::{FormSource, ManifestFile, MediaFile};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::Result;

/// Diff result for one server form.
///
/// Ephemeral: constructed per sync pass, consumed by the synchronizer and
/// host UI, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerFormDetails {
    /// Server-side form identifier
    pub form_id: String,

    /// Human-readable form title
    pub name: String,

    /// Form version as reported by the server
    pub version: Option<String>,

    /// Prefixed content hash from the form index
    pub hash: Option<String>,

    /// Absolute URL of the form definition
    pub download_url: String,

    /// Absolute URL of the attachment manifest
    pub manifest_url: Option<String>,

    /// Content hash of the resolved manifest, when one was fetched
    pub manifest_hash: Option<String>,

    /// The server's definition hash matches no installed form
    pub is_newer_form_version_available: bool,

    /// Some manifest attachment is missing from the local media mirror
    pub are_newer_media_files_available: bool,
}

/// Computes [`ServerFormDetails`] for every form the server lists.
///
/// Failure semantics: a form-index fetch failure aborts the whole pass;
/// a manifest fetch failure is logged and degrades that one form's diff
/// (manifest treated as absent), keeping partial results useful.
pub struct ServerFormsDetailsFetcher {
    forms_repository: Arc<dyn FormsRepository>,
    media_file_repository: Arc<dyn MediaFileRepository>,
    form_source: Arc<dyn FormSource>,
}

impl ServerFormsDetailsFetcher {
    pub fn new(
        forms_repository: Arc<dyn FormsRepository>,
        media_file_repository: Arc<dyn MediaFileRepository>,
        form_source: Arc<dyn FormSource>,
    ) -> Self {
        Self {
            forms_repository,
            media_file_repository,
            form_source,
        }
    }

    /// Fetch details for every server form, always checking media files.
    pub async fn fetch_form_details(&self) -> Result<Vec<ServerFormDetails>> {
        self.fetch_form_details_checking_media(true).await
    }

    /// Fetch details for every server form.
    ///
    /// With `always_check_media_files` false, a form whose definition is
    /// already newer skips the manifest fetch: it will be re-downloaded
    /// anyway, so the media diff is moot.
    #[instrument(skip(self))]
    pub async fn fetch_form_details_checking_media(
        &self,
        always_check_media_files: bool,
    ) -> Result<Vec<ServerFormDetails>> {
        let list_items = self.form_source.fetch_form_list().await?;
        debug!(count = list_items.len(), "Diffing server form index");

        let mut details_list = Vec::with_capacity(list_items.len());

        for item in list_items {
            let mut is_newer_form_version_available = false;
            let mut are_newer_media_files_available = false;
            let mut manifest: Option<ManifestFile> = None;

            if self.forms_repository.contains(&item.form_id).await? {
                is_newer_form_version_available = self
                    .is_newer_form_version_available(item.content_hash())
                    .await?;

                if !is_newer_form_version_available || always_check_media_files {
                    if let Some(manifest_url) = item.manifest_url.as_deref() {
                        manifest = self.manifest_for(manifest_url).await;

                        if let Some(manifest_file) = &manifest {
                            if !manifest_file.media_files.is_empty() {
                                are_newer_media_files_available = self
                                    .are_newer_media_files_available(
                                        &item.form_id,
                                        item.version.as_deref(),
                                        &manifest_file.media_files,
                                    )
                                    .await?;
                            }
                        }
                    }
                }
            }

            details_list.push(ServerFormDetails {
                form_id: item.form_id,
                name: item.name,
                version: item.version,
                hash: item.hash,
                download_url: item.download_url,
                manifest_url: item.manifest_url,
                manifest_hash: manifest.and_then(|m| m.hash),
                is_newer_form_version_available,
                are_newer_media_files_available,
            });
        }

        Ok(details_list)
    }

    /// Fetch a manifest, degrading failures to "no manifest".
    async fn manifest_for(&self, manifest_url: &str) -> Option<ManifestFile> {
        match self.form_source.fetch_manifest(manifest_url).await {
            Ok(manifest) => Some(manifest),
            Err(err) => {
                warn!(manifest_url, error = %err, "Manifest fetch failed, treating as absent");
                None
            }
        }
    }

    /// A server hash is "newer" only when no installed form carries it.
    /// A form index entry without a hash is never considered newer.
    async fn is_newer_form_version_available(&self, content_hash: Option<&str>) -> Result<bool> {
        let Some(hash) = content_hash else {
            return Ok(false);
        };

        let installed = self.forms_repository.get_all().await?;
        Ok(!installed.iter().any(|form| form.hash == hash))
    }

    /// Media is "newer" when some manifest attachment is missing locally,
    /// or when the form+version has no media mirror at all while the
    /// manifest lists attachments.
    async fn are_newer_media_files_available(
        &self,
        form_id: &str,
        version: Option<&str>,
        new_media_files: &[MediaFile],
    ) -> Result<bool> {
        let local_media_files = self.media_file_repository.get_all(form_id, version).await?;

        match local_media_files {
            Some(local_media_files) => Ok(new_media_files
                .iter()
                .any(|media| !is_media_file_already_downloaded(&local_media_files, media))),
            None => Ok(!new_media_files.is_empty()),
        }
    }
}

// TODO: zip attachments bypass the hash check entirely; find a way to take
// them into account too.
fn is_media_file_already_downloaded(
    local_media_files: &[LocalMediaFile],
    new_media_file: &MediaFile,
) -> bool {
    if new_media_file.filename.ends_with(".zip") {
        return true;
    }

    let media_file_hash = new_media_file.content_hash();
    local_media_files
        .iter()
        .any(|local| local.hash == media_file_hash)
}
