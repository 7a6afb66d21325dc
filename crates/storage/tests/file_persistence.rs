use storage::{SessionStore, SqliteSessionStore, USER_KEY};

#[tokio::test]
async fn session_survives_reopening_the_database_file() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("session.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let store = SqliteSessionStore::new(&database_url).await.expect("open");
    store
        .write(USER_KEY, r#"{"id":"offline-user"}"#)
        .await
        .expect("write");
    drop(store);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    let reopened = SqliteSessionStore::new(&database_url).await.expect("reopen");
    assert_eq!(
        reopened.read(USER_KEY).await.expect("read").as_deref(),
        Some(r#"{"id":"offline-user"}"#)
    );
}
