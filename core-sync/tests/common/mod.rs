//! In-memory fakes shared by the core-sync integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::notify::{Notifier, SyncOutcome};
use bridge_traits::storage::FileSystemAccess;
use bytes::Bytes;
use core_forms::error::Result as FormsResult;
use core_forms::models::{Form, LocalMediaFile};
use core_forms::repositories::{FormsRepository, MediaFileRepository};
use core_forms::source::{
    FormListItem, FormSource, FormSourceError, ManifestFile, MediaFile,
};
use core_sync::downloader::FormDownloader;
use core_sync::error::{Result as SyncResult, SyncError};
use core_sync::server_forms::ServerFormDetails;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn list_item(form_id: &str, hash: Option<&str>, manifest_url: Option<&str>) -> FormListItem {
    FormListItem {
        form_id: form_id.to_string(),
        name: format!("{} form", form_id),
        version: Some("1".to_string()),
        hash: hash.map(str::to_string),
        download_url: format!("https://forms.example.com/forms/{}.xml", form_id),
        manifest_url: manifest_url.map(str::to_string),
    }
}

pub fn form_record(form_id: &str, hash: &str) -> Form {
    Form::new(
        form_id,
        format!("{} form", form_id),
        Some("1".to_string()),
        hash,
        format!("/data/forms/{}.xml", form_id),
    )
}

pub fn media_file(filename: &str, hash: &str) -> MediaFile {
    MediaFile {
        filename: filename.to_string(),
        hash: hash.to_string(),
        download_url: format!("https://forms.example.com/media/{}", filename),
    }
}

pub fn local_media_file(filename: &str, hash: &str) -> LocalMediaFile {
    LocalMediaFile {
        filename: filename.to_string(),
        path: format!("/data/forms/media/{}", filename),
        hash: hash.to_string(),
    }
}

pub fn manifest(hash: Option<&str>, media_files: Vec<MediaFile>) -> ManifestFile {
    ManifestFile {
        hash: hash.map(str::to_string),
        media_files,
    }
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryFormsRepository {
    forms: Mutex<Vec<Form>>,
}

impl InMemoryFormsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forms(forms: Vec<Form>) -> Self {
        Self {
            forms: Mutex::new(forms),
        }
    }

    pub fn form_ids(&self) -> Vec<String> {
        self.forms
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.form_id.clone())
            .collect()
    }
}

#[async_trait]
impl FormsRepository for InMemoryFormsRepository {
    async fn contains(&self, form_id: &str) -> FormsResult<bool> {
        Ok(self
            .forms
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.form_id == form_id))
    }

    async fn get_all(&self) -> FormsResult<Vec<Form>> {
        Ok(self.forms.lock().unwrap().clone())
    }

    async fn get_by_form_id(&self, form_id: &str) -> FormsResult<Vec<Form>> {
        Ok(self
            .forms
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.form_id == form_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, form: &Form) -> FormsResult<()> {
        self.forms.lock().unwrap().push(form.clone());
        Ok(())
    }

    async fn delete_by_form_id(&self, form_id: &str) -> FormsResult<u64> {
        let mut forms = self.forms.lock().unwrap();
        let before = forms.len();
        forms.retain(|f| f.form_id != form_id);
        Ok((before - forms.len()) as u64)
    }
}

type MirrorKey = (String, String);

fn mirror_key(form_id: &str, version: Option<&str>) -> MirrorKey {
    (form_id.to_string(), version.unwrap_or("").to_string())
}

#[derive(Default)]
pub struct InMemoryMediaFileRepository {
    mirrors: Mutex<HashMap<MirrorKey, Vec<LocalMediaFile>>>,
}

impl InMemoryMediaFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registered mirror with the given files.
    pub fn seed_mirror(&self, form_id: &str, version: Option<&str>, files: Vec<LocalMediaFile>) {
        self.mirrors
            .lock()
            .unwrap()
            .insert(mirror_key(form_id, version), files);
    }

    pub fn mirror(&self, form_id: &str, version: Option<&str>) -> Option<Vec<LocalMediaFile>> {
        self.mirrors
            .lock()
            .unwrap()
            .get(&mirror_key(form_id, version))
            .cloned()
    }
}

#[async_trait]
impl MediaFileRepository for InMemoryMediaFileRepository {
    async fn get_all(
        &self,
        form_id: &str,
        version: Option<&str>,
    ) -> FormsResult<Option<Vec<LocalMediaFile>>> {
        Ok(self.mirror(form_id, version))
    }

    async fn register_dir(
        &self,
        form_id: &str,
        version: Option<&str>,
        _path: &str,
    ) -> FormsResult<()> {
        self.mirrors
            .lock()
            .unwrap()
            .entry(mirror_key(form_id, version))
            .or_default();
        Ok(())
    }

    async fn add_file(
        &self,
        form_id: &str,
        version: Option<&str>,
        file: &LocalMediaFile,
    ) -> FormsResult<()> {
        self.mirrors
            .lock()
            .unwrap()
            .entry(mirror_key(form_id, version))
            .or_default()
            .push(file.clone());
        Ok(())
    }

    async fn delete_for_form(&self, form_id: &str) -> FormsResult<()> {
        self.mirrors
            .lock()
            .unwrap()
            .retain(|(id, _), _| id != form_id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Form source stub
// ---------------------------------------------------------------------------

pub struct StubFormSource {
    form_list: Mutex<Result<Vec<FormListItem>, FormSourceError>>,
    manifests: Mutex<HashMap<String, Result<ManifestFile, FormSourceError>>>,
    forms: Mutex<HashMap<String, Bytes>>,
    media: Mutex<HashMap<String, Bytes>>,
    pub list_fetches: AtomicUsize,
    pub manifest_fetches: AtomicUsize,
}

impl StubFormSource {
    pub fn new() -> Self {
        Self {
            form_list: Mutex::new(Ok(Vec::new())),
            manifests: Mutex::new(HashMap::new()),
            forms: Mutex::new(HashMap::new()),
            media: Mutex::new(HashMap::new()),
            list_fetches: AtomicUsize::new(0),
            manifest_fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_form_list(&self, items: Vec<FormListItem>) {
        *self.form_list.lock().unwrap() = Ok(items);
    }

    pub fn fail_form_list(&self, err: FormSourceError) {
        *self.form_list.lock().unwrap() = Err(err);
    }

    pub fn set_manifest(&self, url: &str, manifest: ManifestFile) {
        self.manifests
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(manifest));
    }

    pub fn fail_manifest(&self, url: &str, err: FormSourceError) {
        self.manifests
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(err));
    }

    pub fn set_form(&self, url: &str, data: &[u8]) {
        self.forms
            .lock()
            .unwrap()
            .insert(url.to_string(), Bytes::copy_from_slice(data));
    }

    pub fn set_media(&self, url: &str, data: &[u8]) {
        self.media
            .lock()
            .unwrap()
            .insert(url.to_string(), Bytes::copy_from_slice(data));
    }

    pub fn manifest_fetch_count(&self) -> usize {
        self.manifest_fetches.load(Ordering::SeqCst)
    }

    fn not_found(url: &str) -> FormSourceError {
        FormSourceError::ServerError {
            status_code: 404,
            server_url: url.to_string(),
        }
    }
}

impl Default for StubFormSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormSource for StubFormSource {
    async fn fetch_form_list(&self) -> Result<Vec<FormListItem>, FormSourceError> {
        self.list_fetches.fetch_add(1, Ordering::SeqCst);
        self.form_list.lock().unwrap().clone()
    }

    async fn fetch_manifest(&self, manifest_url: &str) -> Result<ManifestFile, FormSourceError> {
        self.manifest_fetches.fetch_add(1, Ordering::SeqCst);
        self.manifests
            .lock()
            .unwrap()
            .get(manifest_url)
            .cloned()
            .unwrap_or_else(|| Err(Self::not_found(manifest_url)))
    }

    async fn fetch_form(&self, download_url: &str) -> Result<Bytes, FormSourceError> {
        self.forms
            .lock()
            .unwrap()
            .get(download_url)
            .cloned()
            .ok_or_else(|| Self::not_found(download_url))
    }

    async fn fetch_media_file(&self, download_url: &str) -> Result<Bytes, FormSourceError> {
        self.media
            .lock()
            .unwrap()
            .get(download_url)
            .cloned()
            .ok_or_else(|| Self::not_found(download_url))
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CountingNotifier {
    outcomes: Mutex<Vec<SyncOutcome>>,
}

impl CountingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<SyncOutcome> {
        self.outcomes.lock().unwrap().clone()
    }

    pub fn successes(&self) -> usize {
        self.outcomes()
            .iter()
            .filter(|o| o.is_success())
            .count()
    }

    pub fn failures(&self) -> Vec<String> {
        self.outcomes()
            .into_iter()
            .filter_map(|o| match o {
                SyncOutcome::Failure { message } => Some(message),
                SyncOutcome::Success => None,
            })
            .collect()
    }
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify_sync(&self, outcome: SyncOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }
}

// ---------------------------------------------------------------------------
// Downloader
// ---------------------------------------------------------------------------

pub struct RecordingDownloader {
    downloaded: Mutex<Vec<String>>,
    failing: bool,
}

impl RecordingDownloader {
    pub fn new() -> Self {
        Self {
            downloaded: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            downloaded: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn downloaded(&self) -> Vec<String> {
        self.downloaded.lock().unwrap().clone()
    }
}

impl Default for RecordingDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormDownloader for RecordingDownloader {
    async fn download_form(&self, form: &ServerFormDetails) -> SyncResult<()> {
        if self.failing {
            return Err(SyncError::Download {
                form_id: form.form_id.clone(),
                message: "simulated download failure".to_string(),
            });
        }
        self.downloaded.lock().unwrap().push(form.form_id.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Background executor
// ---------------------------------------------------------------------------

use bridge_traits::background::{BackgroundExecutor, TaskConstraints, TaskId};
use std::time::Duration;

#[derive(Default)]
pub struct RecordingExecutor {
    scheduled: Mutex<Vec<(String, Duration, TaskConstraints)>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> Vec<(String, Duration, TaskConstraints)> {
        self.scheduled.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackgroundExecutor for RecordingExecutor {
    async fn schedule_task(
        &self,
        task_id: &str,
        interval: Duration,
        constraints: TaskConstraints,
    ) -> BridgeResult<TaskId> {
        self.scheduled
            .lock()
            .unwrap()
            .push((task_id.to_string(), interval, constraints));
        Ok(TaskId::new(task_id))
    }

    async fn cancel_task(&self, task_id: &TaskId) -> BridgeResult<()> {
        self.scheduled
            .lock()
            .unwrap()
            .retain(|(id, _, _)| id != &task_id.0);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File system
// ---------------------------------------------------------------------------

pub struct InMemoryFileSystem {
    root: PathBuf,
    files: Mutex<HashMap<PathBuf, Bytes>>,
    dirs: Mutex<HashSet<PathBuf>>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/data"),
            files: Mutex::new(HashMap::new()),
            dirs: Mutex::new(HashSet::new()),
        }
    }

    pub fn file(&self, path: &Path) -> Option<Bytes> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl Default for InMemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileSystemAccess for InMemoryFileSystem {
    async fn get_data_directory(&self) -> BridgeResult<PathBuf> {
        self.dirs.lock().unwrap().insert(self.root.clone());
        Ok(self.root.clone())
    }

    async fn exists(&self, path: &Path) -> BridgeResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(path)
            || self.dirs.lock().unwrap().contains(path))
    }

    async fn create_dir_all(&self, path: &Path) -> BridgeResult<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> BridgeResult<Bytes> {
        self.file(path).ok_or_else(|| {
            BridgeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                path.display().to_string(),
            ))
        })
    }

    async fn write_file(&self, path: &Path, data: Bytes) -> BridgeResult<()> {
        self.files.lock().unwrap().insert(path.to_path_buf(), data);
        Ok(())
    }

    async fn delete_file(&self, path: &Path) -> BridgeResult<()> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    async fn delete_dir_all(&self, path: &Path) -> BridgeResult<()> {
        self.files
            .lock()
            .unwrap()
            .retain(|p, _| !p.starts_with(path));
        self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }

    async fn list_directory(&self, path: &Path) -> BridgeResult<Vec<PathBuf>> {
        let mut entries: Vec<PathBuf> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        entries.sort();
        Ok(entries)
    }
}
