use std::sync::Arc;

use chrono::{DateTime, Utc};
use snipurl::domain::repositories::{ClickRepository, MappingRepository};
use snipurl::infrastructure::memory::MemoryStore;
use snipurl::prelude::{ClickRecorder, NewMapping};

fn new_mapping(code: &str, owner_id: i64) -> NewMapping {
    NewMapping {
        short_code: code.to_string(),
        original_url: "https://go.dev".to_string(),
        owner_id,
    }
}

async fn all_clicks(store: &MemoryStore, mapping_id: i64) -> usize {
    store
        .clicks_between(mapping_id, DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC)
        .await
        .unwrap()
        .len()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clicks_are_not_lost() {
    let store = Arc::new(MemoryStore::new());
    let mapping = store.insert(new_mapping("Hot00000", 1)).await.unwrap();

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.record_click(mapping.id).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let found = store.find_by_code("Hot00000").await.unwrap().unwrap();
    assert_eq!(found.click_count, 100);
    assert_eq!(all_clicks(&store, mapping.id).await, 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clicks_on_distinct_mappings() {
    let store = Arc::new(MemoryStore::new());
    let a = store.insert(new_mapping("AAAAAAAA", 1)).await.unwrap();
    let b = store.insert(new_mapping("BBBBBBBB", 2)).await.unwrap();

    let handles: Vec<_> = (0..60)
        .map(|i| {
            let store = store.clone();
            let id = if i % 3 == 0 { b.id } else { a.id };
            tokio::spawn(async move { store.record_click(id).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let a = store.find_by_code("AAAAAAAA").await.unwrap().unwrap();
    let b = store.find_by_code("BBBBBBBB").await.unwrap().unwrap();

    assert_eq!(a.click_count, 40);
    assert_eq!(b.click_count, 20);
    assert_eq!(all_clicks(&store, a.id).await, 40);
    assert_eq!(all_clicks(&store, b.id).await, 20);
}

#[tokio::test]
async fn test_counter_matches_event_log_through_recorder() {
    let store = Arc::new(MemoryStore::new());
    let mapping = store.insert(new_mapping("Rec00000", 1)).await.unwrap();
    let recorder = ClickRecorder::new(store.clone());

    for _ in 0..5 {
        recorder.record_strict(&mapping).await.unwrap();
    }

    let found = store.find_by_code("Rec00000").await.unwrap().unwrap();
    assert_eq!(found.click_count, 5);
    assert_eq!(all_clicks(&store, mapping.id).await, 5);
}

#[tokio::test]
async fn test_owner_clicks_exclude_other_owners() {
    let store = MemoryStore::new();
    let mine = store.insert(new_mapping("Mine0000", 1)).await.unwrap();
    let theirs = store.insert(new_mapping("Theirs00", 2)).await.unwrap();

    store.record_click(mine.id).await.unwrap();
    store.record_click(theirs.id).await.unwrap();
    store.record_click(theirs.id).await.unwrap();

    let events = store
        .clicks_for_owner(1, DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC)
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].mapping_id, mine.id);
}
