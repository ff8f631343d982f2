//! Behavioral tests for the match-exactly synchronizer.

mod common;

use common::*;
use core_forms::repositories::{FormsRepository, MediaFileRepository};
use core_forms::source::FormSource;
use core_sync::downloader::FormDownloader;
use core_sync::error::SyncError;
use core_sync::server_forms::ServerFormsDetailsFetcher;
use core_sync::synchronizer::ServerFormsSynchronizer;
use std::sync::Arc;

struct Fixture {
    forms: Arc<InMemoryFormsRepository>,
    media: Arc<InMemoryMediaFileRepository>,
    source: Arc<StubFormSource>,
    downloader: Arc<RecordingDownloader>,
    synchronizer: ServerFormsSynchronizer,
}

fn fixture(installed: Vec<core_forms::models::Form>, downloader: RecordingDownloader) -> Fixture {
    let forms = Arc::new(InMemoryFormsRepository::with_forms(installed));
    let media = Arc::new(InMemoryMediaFileRepository::new());
    let source = Arc::new(StubFormSource::new());
    let downloader = Arc::new(downloader);

    let fetcher = Arc::new(ServerFormsDetailsFetcher::new(
        Arc::clone(&forms) as Arc<dyn FormsRepository>,
        Arc::clone(&media) as Arc<dyn MediaFileRepository>,
        Arc::clone(&source) as Arc<dyn FormSource>,
    ));

    let synchronizer = ServerFormsSynchronizer::new(
        fetcher,
        Arc::clone(&forms) as Arc<dyn FormsRepository>,
        Arc::clone(&media) as Arc<dyn MediaFileRepository>,
        Arc::clone(&downloader) as Arc<dyn FormDownloader>,
    );

    Fixture {
        forms,
        media,
        source,
        downloader,
        synchronizer,
    }
}

#[tokio::test]
async fn test_deletes_forms_the_server_dropped() {
    let fx = fixture(
        vec![form_record("census", "h1"), form_record("retired", "h2")],
        RecordingDownloader::new(),
    );
    fx.media.seed_mirror("retired", Some("1"), vec![]);
    fx.source
        .set_form_list(vec![list_item("census", Some("md5:h1"), None)]);

    let stats = fx.synchronizer.synchronize().await.unwrap();

    assert_eq!(stats.forms_deleted, 1);
    assert_eq!(fx.forms.form_ids(), vec!["census"]);
    assert!(fx.media.mirror("retired", Some("1")).is_none());
}

#[tokio::test]
async fn test_up_to_date_form_is_not_downloaded() {
    let fx = fixture(vec![form_record("census", "h1")], RecordingDownloader::new());
    fx.source
        .set_form_list(vec![list_item("census", Some("md5:h1"), None)]);

    let stats = fx.synchronizer.synchronize().await.unwrap();

    assert_eq!(stats.forms_downloaded, 0);
    assert!(fx.downloader.downloaded().is_empty());
}

#[tokio::test]
async fn test_downloads_new_and_updated_forms() {
    let fx = fixture(vec![form_record("census", "h1")], RecordingDownloader::new());
    fx.source.set_form_list(vec![
        // updated definition
        list_item("census", Some("md5:h2"), None),
        // not installed at all
        list_item("household", Some("md5:h3"), None),
    ]);

    let stats = fx.synchronizer.synchronize().await.unwrap();

    assert_eq!(stats.forms_deleted, 0);
    assert_eq!(stats.forms_downloaded, 2);
    assert_eq!(fx.downloader.downloaded(), vec!["census", "household"]);
}

#[tokio::test]
async fn test_download_failure_fails_the_pass() {
    let fx = fixture(vec![], RecordingDownloader::failing());
    fx.source
        .set_form_list(vec![list_item("census", Some("md5:h1"), None)]);

    match fx.synchronizer.synchronize().await {
        Err(SyncError::Download { form_id, .. }) => assert_eq!(form_id, "census"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_server_list_empties_the_library() {
    let fx = fixture(
        vec![form_record("census", "h1"), form_record("household", "h2")],
        RecordingDownloader::new(),
    );

    let stats = fx.synchronizer.synchronize().await.unwrap();

    assert_eq!(stats.forms_deleted, 2);
    assert_eq!(stats.forms_downloaded, 0);
    assert!(fx.forms.form_ids().is_empty());
}
