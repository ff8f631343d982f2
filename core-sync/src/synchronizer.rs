//! Match-exactly form synchronization
//!
//! Reconciles the local form library with the server's form index: forms the
//! server no longer lists are removed, forms that are missing locally or
//! carry newer definitions/media are downloaded.

use core_forms::repositories::{FormsRepository, MediaFileRepository};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::downloader::FormDownloader;
use crate::error::Result;
use crate::server_forms::ServerFormsDetailsFetcher;

/// Counters for one completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Local forms removed because the server dropped them
    pub forms_deleted: u64,
    /// Forms installed or reinstalled this pass
    pub forms_downloaded: u64,
}

/// One-shot synchronizer bringing the library to match the server exactly.
pub struct ServerFormsSynchronizer {
    details_fetcher: Arc<ServerFormsDetailsFetcher>,
    forms_repository: Arc<dyn FormsRepository>,
    media_file_repository: Arc<dyn MediaFileRepository>,
    form_downloader: Arc<dyn FormDownloader>,
}

impl ServerFormsSynchronizer {
    pub fn new(
        details_fetcher: Arc<ServerFormsDetailsFetcher>,
        forms_repository: Arc<dyn FormsRepository>,
        media_file_repository: Arc<dyn MediaFileRepository>,
        form_downloader: Arc<dyn FormDownloader>,
    ) -> Self {
        Self {
            details_fetcher,
            forms_repository,
            media_file_repository,
            form_downloader,
        }
    }

    /// Run one reconciliation pass.
    ///
    /// A form-index fetch failure aborts immediately; so does a failed
    /// download — partially applied passes are safe because each form is
    /// installed atomically relative to the library.
    #[instrument(skip(self))]
    pub async fn synchronize(&self) -> Result<SyncStats> {
        let server_forms = self.details_fetcher.fetch_form_details().await?;
        let mut stats = SyncStats::default();

        // Remove local forms the server no longer lists.
        let local_form_ids: BTreeSet<String> = self
            .forms_repository
            .get_all()
            .await?
            .into_iter()
            .map(|form| form.form_id)
            .collect();

        for form_id in local_form_ids {
            if !server_forms.iter().any(|form| form.form_id == form_id) {
                info!(form_id = %form_id, "Removing form dropped by server");
                self.forms_repository.delete_by_form_id(&form_id).await?;
                self.media_file_repository.delete_for_form(&form_id).await?;
                stats.forms_deleted += 1;
            }
        }

        // Install anything missing or out of date.
        for form in &server_forms {
            let installed = self.forms_repository.contains(&form.form_id).await?;
            if !installed
                || form.is_newer_form_version_available
                || form.are_newer_media_files_available
            {
                info!(form_id = %form.form_id, installed, "Downloading form");
                self.form_downloader.download_form(form).await?;
                stats.forms_downloaded += 1;
            }
        }

        info!(
            forms_deleted = stats.forms_deleted,
            forms_downloaded = stats.forms_downloaded,
            "Reconciliation pass finished"
        );
        Ok(stats)
    }
}
