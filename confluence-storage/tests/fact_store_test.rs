//! FactStore contract tests against the in-memory engine.

use confluence_core::facts::ApiFact;
use confluence_core::history::BrowserHistory;
use confluence_core::keys::{ApiKey, BrowserKey};
use confluence_core::traits::FactStore;
use confluence_storage::StorageEngine;

const HISTORY: &str = r#"{
    "Chrome": {"54": "2016-10-12", "55": "2016-12-01"},
    "Edge": {"14": "2016-08-02"},
    "Safari": {"10": "2016-09-20"}
}"#;

fn history() -> BrowserHistory {
    BrowserHistory::from_json_str(HISTORY).unwrap()
}

fn fact(browser: &str, version: &str, os: &str, iface: &str, api: &str) -> ApiFact {
    ApiFact {
        browser_name: browser.to_string(),
        browser_version: version.to_string(),
        os_name: os.to_string(),
        os_version: "10.0".to_string(),
        interface_name: iface.to_string(),
        api_name: api.to_string(),
    }
}

async fn seeded_engine() -> StorageEngine {
    let engine = StorageEngine::open_in_memory().unwrap();
    let facts = vec![
        fact("Chrome", "55.0", "Windows", "Array", "find"),
        fact("Chrome", "55.0", "Windows", "Audio", "stop"),
        fact("Edge", "14.1", "Windows", "Array", "find"),
        fact("Edge", "14.1", "Windows", "Audio", "play"),
        fact("Safari", "10.1", "OSX", "ApplePay", "about"),
        fact("Safari", "10.1", "OSX", "Audio", "play"),
        fact("Safari", "10.1", "OSX", "Audio", "stop"),
        fact("Safari", "10.1", "OSX", "Array", "find"),
    ];
    engine.insert_facts(&facts, &history()).await.unwrap();
    engine
}

#[tokio::test]
async fn browser_keys_are_distinct_and_sorted() {
    let engine = seeded_engine().await;
    let keys = engine.browser_keys().await.unwrap();
    let rendered: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
    assert_eq!(
        rendered,
        vec![
            "Chrome_55.0_Windows_10.0",
            "Edge_14.1_Windows_10.0",
            "Safari_10.1_OSX_10.0",
        ]
    );
}

#[tokio::test]
async fn api_sequences_come_back_sorted() {
    let engine = seeded_engine().await;
    let key = BrowserKey::new("Safari", "10.1", "OSX", "10.0");
    let apis = engine.api_keys_for(&key).await.unwrap();
    let rendered: Vec<&str> = apis.iter().map(|k| k.as_str()).collect();
    assert_eq!(
        rendered,
        vec!["ApplePay#about", "Array#find", "Audio#play", "Audio#stop"]
    );
}

#[tokio::test]
async fn grouping_is_restricted_to_given_browsers() {
    let engine = seeded_engine().await;
    let chrome = BrowserKey::new("Chrome", "55.0", "Windows", "10.0");
    let edge = BrowserKey::new("Edge", "14.1", "Windows", "10.0");

    let grouped = engine
        .api_keys_grouped(&[chrome.clone(), edge.clone()])
        .await
        .unwrap();
    assert_eq!(grouped.len(), 3);
    assert_eq!(
        grouped.get(&ApiKey::new("Array", "find")).unwrap(),
        &vec![chrome.clone(), edge.clone()]
    );
    assert_eq!(
        grouped.get(&ApiKey::new("Audio", "stop")).unwrap(),
        &vec![chrome]
    );
    // Safari-only APIs must not leak in.
    assert!(!grouped.contains_key(&ApiKey::new("ApplePay", "about")));
}

#[tokio::test]
async fn present_filter_intersects_candidates() {
    let engine = seeded_engine().await;
    let safari = BrowserKey::new("Safari", "10.1", "OSX", "10.0");
    let candidates = vec![ApiKey::new("Audio", "stop"), ApiKey::new("Gone", "api")];
    let present = engine
        .api_keys_present(&[safari], &candidates)
        .await
        .unwrap();
    assert_eq!(present, vec![ApiKey::new("Audio", "stop")]);
}

#[tokio::test]
async fn release_window_bounds_are_strict() {
    let engine = seeded_engine().await;
    let after = "2016-08-02T00:00:00Z".parse().unwrap();
    let before = "2016-12-01T00:00:00Z".parse().unwrap();

    // Edge released exactly at `after` and Chrome exactly at `before`;
    // both must be excluded. Only Safari (2016-09-20) falls inside.
    let released = engine
        .browser_keys_released_within("Firefox", after, before)
        .await
        .unwrap();
    let rendered: Vec<&str> = released.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(rendered, vec!["Safari_10.1_OSX_10.0"]);
}

#[tokio::test]
async fn release_window_excludes_own_browser_name() {
    let engine = seeded_engine().await;
    let after = "2016-01-01T00:00:00Z".parse().unwrap();
    let before = "2017-01-01T00:00:00Z".parse().unwrap();
    let released = engine
        .browser_keys_released_within("Safari", after, before)
        .await
        .unwrap();
    assert!(released.iter().all(|(k, _)| k.browser_name() != "Safari"));
    assert_eq!(released.len(), 2);
}

#[tokio::test]
async fn reingestion_is_idempotent() {
    let engine = seeded_engine().await;
    let before = engine.fact_count().unwrap();
    let inserted = engine
        .insert_facts(
            &[fact("Chrome", "55.0", "Windows", "Array", "find")],
            &history(),
        )
        .await
        .unwrap();
    assert_eq!(inserted, 0);
    assert_eq!(engine.fact_count().unwrap(), before);
}

#[tokio::test]
async fn malformed_facts_are_rejected_at_ingestion() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut bad = fact("Chrome", "55.0", "Windows", "Array", "find");
    bad.interface_name = String::new();
    let result = engine.insert_facts(&[bad], &history()).await;
    assert!(result.is_err());
    assert_eq!(engine.fact_count().unwrap(), 0);
}

#[tokio::test]
async fn unknown_browser_fails_ingestion() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let result = engine
        .insert_facts(
            &[fact("Netscape", "4.0", "Windows", "Array", "find")],
            &history(),
        )
        .await;
    assert!(result.is_err());
}
