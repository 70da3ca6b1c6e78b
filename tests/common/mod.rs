#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::TempDir;
use tweet_archive::application::services::SampleService;
use tweet_archive::domain::repositories::TweetRepository;
use tweet_archive::infrastructure::archive::{TWEETS_ENTRY, ZipTweetRepository};
use tweet_archive::infrastructure::cache::{NullCache, SnapshotCache};
use tweet_archive::state::AppState;
use zip::write::SimpleFileOptions;

pub const SAMPLE_SEED: u64 = 7;

/// Writes a zip at `dir/archive.zip` with the given entries.
pub fn write_archive(dir: &Path, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("archive.zip");
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Wraps records the way the export does: assignment prefix, `tweet` key.
pub fn export_payload(tweets: &[Value]) -> String {
    let records: Vec<Value> = tweets.iter().map(|t| json!({ "tweet": t })).collect();
    format!(
        "window.YTD.tweet.part0 = {};\n",
        serde_json::to_string_pretty(&records).unwrap()
    )
}

/// Three records: a retweet, a reply with mention/hashtag/link, a plain post.
pub fn scenario_tweets() -> Vec<Value> {
    vec![
        json!({
            "id_str": "1",
            "full_text": "RT @x hi",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018"
        }),
        json!({
            "id_str": "2",
            "full_text": "@a hello @b #tag http://short",
            "created_at": "Sat Jan 01 12:00:00 +0000 2022",
            "user": { "name": "Alice Example", "screen_name": "alice" },
            "entities": { "urls": [
                { "url": "http://short", "expanded_url": "https://example.com/long" }
            ] }
        }),
        json!({
            "id_str": "3",
            "full_text": "plain",
            "created_at": "Mon Jan 03 08:30:00 +0000 2022"
        }),
    ]
}

/// Archive holding [`scenario_tweets`] in export form.
pub fn scenario_archive() -> (TempDir, PathBuf) {
    archive_with_payload(&export_payload(&scenario_tweets()))
}

pub fn archive_with_payload(payload: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path(), &[(TWEETS_ENTRY, payload)]);
    (dir, path)
}

pub fn create_test_state(path: &Path) -> AppState {
    let cache: Arc<dyn SnapshotCache> = Arc::new(NullCache::new());
    let repository: Arc<dyn TweetRepository> =
        Arc::new(ZipTweetRepository::new(path).with_cache(cache.clone()));

    AppState::new(repository.clone(), cache, 5)
        .with_sampler(SampleService::with_seed(repository, SAMPLE_SEED))
}

pub fn rpc(id: u64, method: &str, params: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params })
}
