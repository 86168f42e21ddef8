//! End-to-end runs: mock site, mock Bot API and an on-disk snapshot store

use crate::{match_path, mount_bot_api, mount_site, sent_messages, test_config};
use std::path::Path;
use std::time::Duration;
use ticket_watch::model::TicketCategory;
use ticket_watch::pipeline::run_once;
use ticket_watch::storage::{SnapshotStore, SqliteSnapshotStore};
use ticket_watch::WatchError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn open(db_path: &Path) -> SqliteSnapshotStore {
    SqliteSnapshotStore::new(db_path, Duration::from_secs(3)).unwrap()
}

#[tokio::test]
async fn test_first_run_notifies_new_match_and_stores_batch() {
    let site = MockServer::start().await;
    let bot = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tickets.db");

    mount_site(&site, 8, &[(5, 1, 500)]).await;
    mount_bot_api(&bot).await;

    let config = test_config(&site.uri(), &bot.uri(), db_path.to_str().unwrap(), 8);
    let report = run_once(&config).await.unwrap();

    assert_eq!(report.fetched, 8);
    assert_eq!(report.changed, vec![5]);
    assert!(!report.stale_warning);

    // No staleness warning for the epoch placeholder of an empty store
    let messages = sent_messages(&bot).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["text"], "`Update for match №5`");

    let stored = open(&db_path).latest().unwrap();
    assert_eq!(Some(stored.timestamp), report.persisted_at);
    assert_eq!(stored.batch.len(), 8);

    let numbers: Vec<u32> = stored.batch.iter().map(|r| r.match_number).collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
    assert_eq!(
        stored.batch.records()[4].available_categories,
        vec![TicketCategory::new(1, 500)]
    );
    assert!(stored.batch.records()[0].available_categories.is_empty());
}

#[tokio::test]
async fn test_repeated_run_only_reports_new_tiers() {
    let site = MockServer::start().await;
    let bot = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tickets.db");

    mount_site(&site, 4, &[(2, 1, 600)]).await;
    mount_bot_api(&bot).await;

    let config = test_config(&site.uri(), &bot.uri(), db_path.to_str().unwrap(), 4);
    let first = run_once(&config).await.unwrap();
    assert_eq!(first.changed, vec![2]);

    let second = run_once(&config).await.unwrap();
    assert!(second.changed.is_empty());
    assert!(second.persisted_at > first.persisted_at);

    // Category 3 shows up for match 2, a price change for nothing else
    site.reset().await;
    mount_site(&site, 4, &[(2, 1, 650), (2, 3, 220)]).await;

    let third = run_once(&config).await.unwrap();
    assert_eq!(third.changed, vec![2]);

    assert_eq!(sent_messages(&bot).await.len(), 2);
}

#[tokio::test]
async fn test_failing_slot_aborts_without_persisting() {
    let site = MockServer::start().await;
    let bot = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tickets.db");

    Mock::given(method("GET"))
        .and(path(match_path(3)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;
    mount_site(&site, 4, &[(1, 1, 600), (4, 2, 450)]).await;
    mount_bot_api(&bot).await;

    let config = test_config(&site.uri(), &bot.uri(), db_path.to_str().unwrap(), 4);
    let err = run_once(&config).await.unwrap_err();

    match err {
        WatchError::FetchAbort(slot) => assert_eq!(slot.match_number, 3),
        other => panic!("unexpected error: {:?}", other),
    }

    let messages = sent_messages(&bot).await;
    assert_eq!(messages.len(), 1);
    let text = messages[0]["text"].as_str().unwrap();
    assert!(text.contains("TicketWatch got error"));
    assert!(text.contains("match_number: 3"));

    assert!(open(&db_path).latest().unwrap().is_empty());
}

#[tokio::test]
async fn test_disabled_updates_only_fetch() {
    let site = MockServer::start().await;
    let bot = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tickets.db");

    mount_site(&site, 3, &[(1, 1, 600)]).await;
    mount_bot_api(&bot).await;

    let mut config = test_config(&site.uri(), &bot.uri(), db_path.to_str().unwrap(), 3);
    config.run.update_state = false;

    let report = run_once(&config).await.unwrap();

    assert_eq!(report.fetched, 3);
    assert!(report.persisted_at.is_none());
    assert!(sent_messages(&bot).await.is_empty());
    assert!(open(&db_path).latest().unwrap().is_empty());
}
