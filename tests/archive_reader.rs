mod common;

use std::fs;
use std::sync::Arc;

use serde_json::json;
use tweet_archive::domain::repositories::TweetRepository;
use tweet_archive::error::AppError;
use tweet_archive::infrastructure::archive::ZipTweetRepository;
use tweet_archive::infrastructure::cache::{MemoryCache, SnapshotCache};

fn ids(tweets: &[tweet_archive::domain::entities::RawTweet]) -> Vec<String> {
    tweets.iter().map(|t| t.id().unwrap()).collect()
}

#[tokio::test]
async fn test_load_recent_sorted_newest_first() {
    let (_dir, path) = common::scenario_archive();
    let repo = ZipTweetRepository::new(&path);

    let tweets = repo.load_recent().await.unwrap();

    assert_eq!(ids(&tweets), vec!["3", "2", "1"]);
}

#[tokio::test]
async fn test_unwrapped_records_are_accepted() {
    let payload = serde_json::to_string(&common::scenario_tweets()).unwrap();
    let (_dir, path) = common::archive_with_payload(&payload);

    let tweets = ZipTweetRepository::new(&path).load_recent().await.unwrap();

    assert_eq!(tweets.len(), 3);
}

#[tokio::test]
async fn test_lenient_payload() {
    let payload = r#"window.YTD.tweet.part0 = [
        // exported by hand
        { tweet: { id_str: '10', full_text: 'single quoted', created_at: 'Sat Jan 01 12:00:00 +0000 2022', }, },
        { tweet: { id_str: "11", full_text: "double quoted", created_at: "Mon Jan 03 08:30:00 +0000 2022" } },
    ];"#;
    let (_dir, path) = common::archive_with_payload(payload);

    let tweets = ZipTweetRepository::new(&path).load_recent().await.unwrap();

    assert_eq!(ids(&tweets), vec!["11", "10"]);
    assert_eq!(tweets[1].raw_text(), "single quoted");
}

#[tokio::test]
async fn test_undecodable_payload() {
    let (_dir, path) = common::archive_with_payload("window.x = [ { oops ");

    let result = ZipTweetRepository::new(&path).load_recent().await;

    assert!(matches!(result, Err(AppError::PayloadDecode(_))));
}

#[tokio::test]
async fn test_code_is_never_evaluated() {
    let (_dir, path) = common::archive_with_payload("window.x = [ (function () { return 1 })() ];");

    let result = ZipTweetRepository::new(&path).load_recent().await;

    assert!(matches!(result, Err(AppError::PayloadDecode(_))));
}

#[tokio::test]
async fn test_non_array_payload_is_empty() {
    let (_dir, path) = common::archive_with_payload(r#"window.x = { "not": "a list" };"#);

    let tweets = ZipTweetRepository::new(&path).load_recent().await.unwrap();

    assert!(tweets.is_empty());
}

#[tokio::test]
async fn test_missing_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_archive(dir.path(), &[("data/like.js", "[]")]);
    let repo = ZipTweetRepository::new(&path);

    assert!(matches!(
        repo.load_recent().await,
        Err(AppError::EntryNotFound { .. })
    ));
    assert!(matches!(
        repo.health_check().await,
        Err(AppError::EntryNotFound { .. })
    ));
}

#[tokio::test]
async fn test_not_a_zip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.zip");
    fs::write(&path, b"definitely not a zip file").unwrap();

    let result = ZipTweetRepository::new(&path).load_recent().await;

    assert!(matches!(result, Err(AppError::ArchiveOpen { .. })));
}

#[tokio::test]
async fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let repo = ZipTweetRepository::new(dir.path().join("gone.zip"));

    assert!(matches!(
        repo.load_recent().await,
        Err(AppError::ArchiveOpen { .. })
    ));
}

#[tokio::test]
async fn test_payload_limit() {
    let (_dir, path) = common::scenario_archive();
    let repo = ZipTweetRepository::new(&path).with_max_payload_bytes(16);

    assert!(matches!(
        repo.load_recent().await,
        Err(AppError::PayloadDecode(_))
    ));
}

#[tokio::test]
async fn test_unbounded_payload_limit() {
    let (_dir, path) = common::scenario_archive();
    let repo = ZipTweetRepository::new(&path).with_max_payload_bytes(u64::MAX);

    let tweets = repo.load_recent().await.unwrap();

    assert_eq!(ids(&tweets), vec!["3", "2", "1"]);
}

#[tokio::test]
async fn test_archive_rewrite_is_picked_up() {
    let (dir, path) = common::scenario_archive();
    let repo = ZipTweetRepository::new(&path);

    assert_eq!(repo.load_recent().await.unwrap().len(), 3);

    let payload = common::export_payload(&[json!({ "id_str": "99", "full_text": "only one" })]);
    common::write_archive(dir.path(), &[("data/tweets.js", payload.as_str())]);

    assert_eq!(ids(&repo.load_recent().await.unwrap()), vec!["99"]);
}

#[tokio::test]
async fn test_memory_cache_is_invalidated_by_rewrite() {
    let (dir, path) = common::scenario_archive();
    let cache: Arc<dyn SnapshotCache> = Arc::new(MemoryCache::new());
    let repo = ZipTweetRepository::new(&path).with_cache(cache.clone());

    let first = repo.load_recent().await.unwrap();
    let second = repo.load_recent().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let payload = common::export_payload(&[json!({ "id_str": "99", "full_text": "only one" })]);
    common::write_archive(dir.path(), &[("data/tweets.js", payload.as_str())]);

    assert_eq!(ids(&repo.load_recent().await.unwrap()), vec!["99"]);
}
