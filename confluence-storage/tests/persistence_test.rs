//! File-backed persistence: data written through one engine is visible after
//! reopening, and reads go through the read pool.

use confluence_core::facts::ApiFact;
use confluence_core::history::BrowserHistory;
use confluence_core::traits::FactStore;
use confluence_storage::StorageEngine;

fn history() -> BrowserHistory {
    BrowserHistory::from_json_str(r#"{"Chrome": {"55": "2016-12-01"}}"#).unwrap()
}

fn facts() -> Vec<ApiFact> {
    vec![ApiFact {
        browser_name: "Chrome".to_string(),
        browser_version: "55.0".to_string(),
        os_name: "Windows".to_string(),
        os_version: "10.0".to_string(),
        interface_name: "Array".to_string(),
        api_name: "find".to_string(),
    }]
}

#[tokio::test]
async fn facts_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("confluence.db");

    {
        let engine = StorageEngine::open(&db_path, 2).unwrap();
        let inserted = engine.insert_facts(&facts(), &history()).await.unwrap();
        assert_eq!(inserted, 1);
    }

    let reopened = StorageEngine::open(&db_path, 2).unwrap();
    assert_eq!(reopened.fact_count().unwrap(), 1);
    let keys = reopened.browser_keys().await.unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].as_str(), "Chrome_55.0_Windows_10.0");
}
