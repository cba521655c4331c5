//! API matrix integration tests over a seeded storage engine.

use rustc_hash::FxHashMap;

use confluence_core::facts::ApiFact;
use confluence_core::history::BrowserHistory;
use confluence_core::keys::BrowserKey;
use confluence_metrics::matrix::{to_csv, to_matrix, MatrixOptions};
use confluence_storage::StorageEngine;

fn fact(browser: (&str, &str, &str, &str), interface_name: &str, api_name: &str) -> ApiFact {
    ApiFact {
        browser_name: browser.0.to_string(),
        browser_version: browser.1.to_string(),
        os_name: browser.2.to_string(),
        os_version: browser.3.to_string(),
        interface_name: interface_name.to_string(),
        api_name: api_name.to_string(),
    }
}

fn key(raw: &str) -> BrowserKey {
    raw.parse().unwrap()
}

async fn seeded_store() -> StorageEngine {
    let chrome = ("Chrome", "55.0", "Windows", "10.0");
    let edge = ("Edge", "14.1", "Windows", "10.0");
    let safari = ("Safari", "10.1", "OSX", "10.12");
    let facts = vec![
        fact(chrome, "Array", "find"),
        fact(chrome, "Audio", "stop"),
        fact(edge, "Array", "find"),
        fact(edge, "Audio", "play"),
        fact(safari, "ApplePay", "about"),
        fact(safari, "Array", "find"),
        fact(safari, "Audio", "play"),
        fact(safari, "Audio", "stop"),
    ];
    let history = BrowserHistory::from_json_str(
        r#"{
            "Chrome": {"55": "2016-12-01"},
            "Edge": {"14": "2016-08-02"},
            "Safari": {"10": "2016-09-20"}
        }"#,
    )
    .unwrap();

    let store = StorageEngine::open_in_memory().unwrap();
    store.insert_facts(&facts, &history).await.unwrap();
    store
}

fn all_keys() -> Vec<BrowserKey> {
    vec![
        key("Chrome_55.0_Windows_10.0"),
        key("Edge_14.1_Windows_10.0"),
        key("Safari_10.1_OSX_10.12"),
    ]
}

#[tokio::test]
async fn matrix_maps_each_api_to_its_owners() {
    let store = seeded_store().await;
    let matrix = to_matrix(&store, &all_keys(), &MatrixOptions::default())
        .await
        .unwrap();

    let about = &matrix["ApplePay"]["about"];
    assert_eq!(about.len(), 1);
    assert!(about.contains_key(&key("Safari_10.1_OSX_10.12")));

    let find = &matrix["Array"]["find"];
    assert_eq!(find.len(), 3);

    let play = &matrix["Audio"]["play"];
    assert!(play.contains_key(&key("Edge_14.1_Windows_10.0")));
    assert!(play.contains_key(&key("Safari_10.1_OSX_10.12")));
    assert!(!play.contains_key(&key("Chrome_55.0_Windows_10.0")));
}

#[tokio::test]
async fn matrix_restricts_to_queried_browsers() {
    let store = seeded_store().await;
    let subset = vec![key("Chrome_55.0_Windows_10.0"), key("Edge_14.1_Windows_10.0")];
    let matrix = to_matrix(&store, &subset, &MatrixOptions::default())
        .await
        .unwrap();

    // Safari-only rows disappear entirely, shared rows lose the Safari cell.
    assert!(!matrix.contains_key("ApplePay"));
    assert_eq!(matrix["Array"]["find"].len(), 2);
}

#[tokio::test]
async fn search_key_filters_case_insensitively() {
    let store = seeded_store().await;
    let options = MatrixOptions {
        search_key: Some("audio#".to_string()),
        ..Default::default()
    };
    let matrix = to_matrix(&store, &all_keys(), &options).await.unwrap();

    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix["Audio"].len(), 2);
}

#[tokio::test]
async fn browser_options_require_presence_and_absence() {
    let store = seeded_store().await;
    let mut browser_options = FxHashMap::default();
    browser_options.insert(key("Safari_10.1_OSX_10.12"), true);
    browser_options.insert(key("Chrome_55.0_Windows_10.0"), false);
    let options = MatrixOptions {
        browser_options: Some(browser_options),
        ..Default::default()
    };
    let matrix = to_matrix(&store, &all_keys(), &options).await.unwrap();

    // Rows Safari owns and Chrome does not: ApplePay#about and Audio#play.
    assert_eq!(matrix.len(), 2);
    assert!(matrix.contains_key("ApplePay"));
    assert_eq!(matrix["Audio"].len(), 1);
    assert!(matrix["Audio"].contains_key("play"));
}

#[tokio::test]
async fn length_filters_keep_rows_by_owner_count() {
    let store = seeded_store().await;

    let exactly_one = MatrixOptions {
        length: Some(1),
        ..Default::default()
    };
    let matrix = to_matrix(&store, &all_keys(), &exactly_one).await.unwrap();
    assert_eq!(matrix.len(), 1);
    assert!(matrix["ApplePay"].contains_key("about"));

    let two_or_three = MatrixOptions {
        lengths: Some(vec![2, 3]),
        ..Default::default()
    };
    let matrix = to_matrix(&store, &all_keys(), &two_or_three).await.unwrap();
    assert!(!matrix.contains_key("ApplePay"));
    assert!(matrix["Array"].contains_key("find"));
    assert_eq!(matrix["Audio"].len(), 2);
}

#[tokio::test]
async fn csv_renders_sorted_rows_with_availability_cells() {
    let store = seeded_store().await;
    let keys = all_keys();
    let matrix = to_matrix(&store, &keys, &MatrixOptions::default())
        .await
        .unwrap();
    let csv = to_csv(&matrix, &keys);

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Interface,API,Chrome_55.0_Windows_10.0,Edge_14.1_Windows_10.0,Safari_10.1_OSX_10.12",
            "ApplePay,about,false,false,true",
            "Array,find,true,true,true",
            "Audio,play,false,true,true",
            "Audio,stop,true,false,true",
        ]
    );
}
