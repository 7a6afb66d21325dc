use super::*;

#[tokio::test]
async fn writes_reads_and_overwrites_keys() {
    let store = SqliteSessionStore::new("sqlite::memory:").await.expect("db");
    assert_eq!(store.read(USER_KEY).await.expect("read"), None);

    store.write(USER_KEY, "{\"id\":\"a\"}").await.expect("write");
    store.write(USER_KEY, "{\"id\":\"b\"}").await.expect("overwrite");

    assert_eq!(
        store.read(USER_KEY).await.expect("read").as_deref(),
        Some("{\"id\":\"b\"}")
    );
    assert_eq!(store.entries().await.expect("entries").len(), 1);
}

#[tokio::test]
async fn remove_is_idempotent() {
    let store = SqliteSessionStore::new("sqlite::memory:").await.expect("db");
    store.write(OFFLINE_MODE_KEY, "true").await.expect("write");
    store.remove(OFFLINE_MODE_KEY).await.expect("remove");
    store.remove(OFFLINE_MODE_KEY).await.expect("remove again");
    assert_eq!(store.read(OFFLINE_MODE_KEY).await.expect("read"), None);
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let store = SqliteSessionStore::new("sqlite::memory:").await.expect("db");
    store.health_check().await.expect("health check");
}

#[tokio::test]
async fn memory_store_behaves_like_sqlite_store() {
    let store = MemorySessionStore::new();
    assert!(store.is_empty().await);
    store.write(USER_KEY, "x").await.expect("write");
    assert_eq!(store.len().await, 1);
    assert_eq!(store.read(USER_KEY).await.expect("read").as_deref(), Some("x"));
    store.remove(USER_KEY).await.expect("remove");
    assert!(store.is_empty().await);
}

#[test]
fn file_path_is_extracted_from_sqlite_urls() {
    assert_eq!(
        sqlite_file_path("sqlite://./data/session.db?mode=rwc"),
        Some(PathBuf::from("./data/session.db"))
    );
    assert_eq!(sqlite_file_path("sqlite::memory:"), None);
    assert_eq!(sqlite_file_path("postgres://x"), None);
}
