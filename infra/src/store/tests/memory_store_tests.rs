//! Unit tests for the in-memory store

use std::time::Duration;

use vf_core::services::verification::VerificationStoreTrait;

use crate::store::InMemoryVerificationStore;

#[tokio::test]
async fn test_set_get_remove() {
    let store = InMemoryVerificationStore::new();

    store.set("email1", "value".to_string(), Some(60)).await.unwrap();
    assert_eq!(store.get("email1").await.unwrap().as_deref(), Some("value"));

    assert_eq!(store.remove("email1").await.unwrap().as_deref(), Some("value"));
    assert_eq!(store.remove("email1").await.unwrap(), None);
    assert_eq!(store.get("email1").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire() {
    let store = InMemoryVerificationStore::new();
    store.set("short", "v".to_string(), Some(5)).await.unwrap();
    store.set("forever", "v".to_string(), None).await.unwrap();

    tokio::time::advance(Duration::from_secs(6)).await;

    assert_eq!(store.get("short").await.unwrap(), None);
    assert_eq!(store.remove("short").await.unwrap(), None);
    assert_eq!(store.get("forever").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test(start_paused = true)]
async fn test_set_without_ttl_keeps_existing_deadline() {
    let store = InMemoryVerificationStore::new();
    store.set("record", "attempts=0".to_string(), Some(10)).await.unwrap();

    tokio::time::advance(Duration::from_secs(6)).await;
    store.set("record", "attempts=1".to_string(), None).await.unwrap();
    assert_eq!(store.get("record").await.unwrap().as_deref(), Some("attempts=1"));

    tokio::time::advance(Duration::from_secs(5)).await;
    assert_eq!(store.get("record").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_rewriting_expired_key_without_ttl_makes_it_persistent() {
    let store = InMemoryVerificationStore::new();
    store.set("key", "old".to_string(), Some(1)).await.unwrap();

    tokio::time::advance(Duration::from_secs(2)).await;
    store.set("key", "new".to_string(), None).await.unwrap();

    tokio::time::advance(Duration::from_secs(3600)).await;
    assert_eq!(store.get("key").await.unwrap().as_deref(), Some("new"));
}

#[tokio::test(start_paused = true)]
async fn test_update_only_touches_live_keys() {
    let store = InMemoryVerificationStore::new();

    assert!(!store.update("missing", "v".to_string()).await.unwrap());
    assert_eq!(store.get("missing").await.unwrap(), None);
    assert!(store.is_empty().await);

    store.set("record", "attempts=0".to_string(), Some(10)).await.unwrap();
    tokio::time::advance(Duration::from_secs(6)).await;
    assert!(store.update("record", "attempts=1".to_string()).await.unwrap());
    assert_eq!(store.get("record").await.unwrap().as_deref(), Some("attempts=1"));

    tokio::time::advance(Duration::from_secs(5)).await;
    assert!(!store.update("record", "attempts=2".to_string()).await.unwrap());

    tokio::time::advance(Duration::from_secs(3600)).await;
    assert_eq!(store.get("record").await.unwrap(), None);
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = InMemoryVerificationStore::new();
    store.set("a", "1".to_string(), Some(1)).await.unwrap();
    store.set("b", "2".to_string(), Some(100)).await.unwrap();
    store.set("c", "3".to_string(), None).await.unwrap();

    tokio::time::advance(Duration::from_secs(2)).await;

    assert_eq!(store.purge_expired().await, 1);
    assert_eq!(store.len().await, 2);
}
