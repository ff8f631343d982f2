//! Form installation
//!
//! Downloads a form definition (and its media attachments, when a manifest
//! resolves) and registers the install in the form library.

use async_trait::async_trait;
use core_forms::hash::md5_hex;
use core_forms::models::{Form, LocalMediaFile};
use core_forms::repositories::{FormsRepository, MediaFileRepository};
use core_forms::source::FormSource;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use bridge_traits::storage::FileSystemAccess;

use crate::error::{Result, SyncError};
use crate::server_forms::ServerFormDetails;

/// Installer seam used by the synchronizer.
#[async_trait]
pub trait FormDownloader: Send + Sync {
    /// Install (or reinstall) one server form.
    async fn download_form(&self, form: &ServerFormDetails) -> Result<()>;
}

/// Default installer writing under `<data dir>/forms/`.
///
/// Installs replace any previous install of the same form id: old library
/// rows are dropped before the new ones are written, so the library never
/// mixes versions of one form.
pub struct ServerFormDownloader {
    form_source: Arc<dyn FormSource>,
    forms_repository: Arc<dyn FormsRepository>,
    media_file_repository: Arc<dyn MediaFileRepository>,
    file_system: Arc<dyn FileSystemAccess>,
}

impl ServerFormDownloader {
    pub fn new(
        form_source: Arc<dyn FormSource>,
        forms_repository: Arc<dyn FormsRepository>,
        media_file_repository: Arc<dyn MediaFileRepository>,
        file_system: Arc<dyn FileSystemAccess>,
    ) -> Self {
        Self {
            form_source,
            forms_repository,
            media_file_repository,
            file_system,
        }
    }

    async fn install_media(
        &self,
        form: &ServerFormDetails,
        media_dir: &Path,
    ) -> Result<()> {
        let Some(manifest_url) = form.manifest_url.as_deref() else {
            return Ok(());
        };

        // Same degradation policy as the diff: a dead manifest endpoint
        // must not leave the form itself uninstalled.
        let manifest = match self.form_source.fetch_manifest(manifest_url).await {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(
                    manifest_url,
                    error = %err,
                    "Manifest fetch failed, installing form without media"
                );
                return Ok(());
            }
        };

        self.file_system.create_dir_all(media_dir).await?;
        self.media_file_repository
            .register_dir(
                &form.form_id,
                form.version.as_deref(),
                &media_dir.display().to_string(),
            )
            .await?;

        for media in &manifest.media_files {
            if media.filename.contains('/') || media.filename.contains('\\') {
                return Err(SyncError::Download {
                    form_id: form.form_id.clone(),
                    message: format!("illegal media filename: {}", media.filename),
                });
            }

            let data = self.form_source.fetch_media_file(&media.download_url).await?;
            let hash = md5_hex(&data);
            let path = media_dir.join(&media.filename);

            self.file_system.write_file(&path, data).await?;
            self.media_file_repository
                .add_file(
                    &form.form_id,
                    form.version.as_deref(),
                    &LocalMediaFile {
                        filename: media.filename.clone(),
                        path: path.display().to_string(),
                        hash,
                    },
                )
                .await?;
        }

        debug!(
            form_id = %form.form_id,
            media_files = manifest.media_files.len(),
            "Installed media attachments"
        );
        Ok(())
    }
}

// File stems come from server-controlled ids; keep them path-safe.
fn sanitize_file_stem(form_id: &str) -> String {
    form_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[async_trait]
impl FormDownloader for ServerFormDownloader {
    #[instrument(skip(self, form), fields(form_id = %form.form_id))]
    async fn download_form(&self, form: &ServerFormDetails) -> Result<()> {
        let data_dir = self.file_system.get_data_directory().await?;
        let forms_dir = data_dir.join("forms");
        self.file_system.create_dir_all(&forms_dir).await?;

        let definition = self.form_source.fetch_form(&form.download_url).await?;
        let hash = md5_hex(&definition);

        let stem = sanitize_file_stem(&form.form_id);
        let form_path = forms_dir.join(format!("{}.xml", stem));
        self.file_system.write_file(&form_path, definition).await?;

        // Replace any previous install of this form id.
        self.forms_repository.delete_by_form_id(&form.form_id).await?;
        self.media_file_repository.delete_for_form(&form.form_id).await?;

        let record = Form::new(
            form.form_id.as_str(),
            form.name.as_str(),
            form.version.clone(),
            hash,
            form_path.display().to_string(),
        );
        self.forms_repository.insert(&record).await?;

        let media_dir = forms_dir.join(format!("{}-media", stem));
        self.install_media(form, &media_dir).await?;

        debug!(form_id = %form.form_id, path = %form_path.display(), "Installed form");
        Ok(())
    }
}
