mod common;

use common::{source, Call, FakeApi};
use datasources::datasource::Record;
use datasources::store::{SourceStore, StoreError};
use datasources::utils::time::TimeParts;
use serde_json::json;

#[tokio::test]
async fn test_load_sorts_by_name_and_decorates() {
    let api = FakeApi::with_sources(vec![
        source("zeta", "Zeta"),
        source("beta", "beta"),
        source("alpha", "Alpha"),
        source("mid", "Middle"),
    ]);
    let mut store = SourceStore::new();

    let count = store.load(&api).await.unwrap();

    assert_eq!(count, 4);
    // Case does not affect the order
    let names: Vec<&str> = store.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Alpha", "beta", "Middle", "Zeta"]);

    let alpha = store.find("alpha").unwrap();
    assert_eq!(alpha.modified_times.schedule, TimeParts::new(1, 0, 0));
    assert_eq!(alpha.modified_times.update_timeout, TimeParts::new(0, 1, 0));
    assert_eq!(alpha.modified_times.request_timeout, TimeParts::new(0, 0, 30));
    assert!(alpha.new_header.name.is_empty());
    assert!(alpha.new_param.name.is_empty());
    assert_eq!(api.calls(), vec![Call::FetchAll]);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_contents() {
    let api = FakeApi::with_sources(vec![source("alpha", "Alpha")]);
    let mut store = SourceStore::new();
    store.load(&api).await.unwrap();

    api.set_failing(true);
    assert!(store.load(&api).await.is_err());

    assert_eq!(store.len(), 1);
    assert!(store.find("alpha").is_some());
}

#[test]
fn test_decorate_from_server_json() {
    // Structured default value from the server is displayed as text
    let doc = json!({
        "id": "owner",
        "name": "Owner",
        "type": {
            "name": "HTTP",
            "parameters": {
                "url": "https://cmdb/",
                "requestTimeout": 90,
                "onMissing": { "name": "defaultValue", "value": [1, 2] },
                "maxParallelReq": 2
            }
        },
        "runParameters": { "schedule": { "type": "scheduled", "duration": 5400 } },
        "updateTimeout": 3600
    });
    let record = Record::decorate(serde_json::from_value(doc).unwrap());

    assert_eq!(record.modified_times.schedule, TimeParts::new(1, 30, 0));
    assert_eq!(record.modified_times.request_timeout, TimeParts::new(0, 1, 30));
    assert_eq!(
        serde_json::to_value(&record.source).unwrap()["type"]["parameters"]["onMissing"],
        json!({ "name": "defaultValue", "value": "[1,2]" })
    );
}

#[test]
fn test_find_and_position() {
    let store = SourceStore::from_records(vec![
        Record::decorate(source("b", "Bravo")),
        Record::decorate(source("a", "Alpha")),
    ]);

    assert_eq!(store.position("a"), Some(0));
    assert_eq!(store.position("b"), Some(1));
    assert_eq!(store.find("b").unwrap().name(), "Bravo");
    assert!(store.find("missing").is_none());
    assert_eq!(store.position("missing"), None);
}

#[test]
fn test_replace_and_remove() {
    let mut store = SourceStore::from_records(vec![
        Record::decorate(source("a", "Alpha")),
        Record::decorate(source("b", "Bravo")),
    ]);

    let mut renamed = store.find("b").unwrap().clone();
    renamed.source.name = "Bravo 2".to_string();
    let previous = store.replace_at(1, renamed).unwrap();
    assert_eq!(previous.name(), "Bravo");
    assert_eq!(store.find("b").unwrap().name(), "Bravo 2");

    let removed = store.remove_at(0).unwrap();
    assert_eq!(removed.id(), "a");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_out_of_range_mutations() {
    let mut store = SourceStore::from_records(vec![Record::decorate(source("a", "Alpha"))]);

    assert_eq!(
        store.replace_at(4, Record::decorate(source("x", "X"))).unwrap_err(),
        StoreError::OutOfRange { index: 4, len: 1 }
    );
    assert_eq!(store.remove_at(1).unwrap_err(), StoreError::OutOfRange { index: 1, len: 1 });
    assert_eq!(store.len(), 1);
}
