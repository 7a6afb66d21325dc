use super::*;
use anyhow::anyhow;
use async_trait::async_trait;
use storage::MemorySessionStore;

fn service(store: Arc<MemorySessionStore>) -> AuthService {
    AuthService::with_login_delay(store, Duration::from_millis(1000))
}

struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn read(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Err(anyhow!("disk unavailable"))
    }

    async fn write(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Err(anyhow!("disk unavailable"))
    }

    async fn remove(&self, _key: &str) -> anyhow::Result<()> {
        Err(anyhow!("disk unavailable"))
    }
}

/// Accepts the user record but rejects every operation on the offline flag.
struct FlagRejectingStore {
    inner: MemorySessionStore,
}

#[async_trait]
impl SessionStore for FlagRejectingStore {
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if key == OFFLINE_MODE_KEY {
            return Err(anyhow!("flag write rejected"));
        }
        self.inner.write(key, value).await
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        if key == OFFLINE_MODE_KEY {
            return Err(anyhow!("flag remove rejected"));
        }
        self.inner.remove(key).await
    }
}

#[tokio::test(start_paused = true)]
async fn student_login_persists_mock_record() {
    let store = Arc::new(MemorySessionStore::new());
    let auth = service(store.clone());

    let user = auth
        .login("asha@school.edu", "secret", Role::Student)
        .await
        .expect("login");
    assert_eq!(user.name, "asha");
    assert_eq!(user.grade.map(Grade::value), Some(9));
    assert_eq!(user.xp, Some(1250));
    assert!(auth.is_authenticated().await);

    let raw = store.read(USER_KEY).await.expect("read").expect("record");
    let persisted: User = serde_json::from_str(&raw).expect("json");
    assert_eq!(persisted, user);
    assert_eq!(store.read(OFFLINE_MODE_KEY).await.expect("read"), None);
}

#[tokio::test(start_paused = true)]
async fn teacher_login_has_no_student_fields() {
    let auth = service(Arc::new(MemorySessionStore::new()));
    let user = auth
        .login("ravi@school.edu", "pw", Role::Teacher)
        .await
        .expect("login");
    assert_eq!(user.grade, None);
    assert_eq!(user.xp, None);
    assert_eq!(auth.session().await.role(), Some(Role::Teacher));
}

#[tokio::test(start_paused = true)]
async fn blank_credentials_leave_session_unchanged() {
    let auth = service(Arc::new(MemorySessionStore::new()));
    let err = auth
        .login("   ", "pw", Role::Student)
        .await
        .expect_err("blank identifier");
    assert!(matches!(err, AuthError::MissingCredentials));
    assert!(auth
        .login("a@b", "", Role::Student)
        .await
        .is_err());
    assert!(!auth.is_authenticated().await);
}

#[tokio::test(start_paused = true)]
async fn logout_during_login_supersedes_the_attempt() {
    let store = Arc::new(MemorySessionStore::new());
    let auth = Arc::new(service(store.clone()));

    let pending = {
        let auth = auth.clone();
        tokio::spawn(async move { auth.login("late@school.edu", "pw", Role::Student).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    auth.logout().await.expect("logout");

    let outcome = pending.await.expect("join");
    assert!(matches!(outcome, Err(AuthError::Superseded)));
    assert!(!auth.is_authenticated().await);
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn newer_login_wins_over_older_one() {
    let auth = Arc::new(service(Arc::new(MemorySessionStore::new())));

    let first = {
        let auth = auth.clone();
        tokio::spawn(async move { auth.login("first@school.edu", "pw", Role::Student).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = auth
        .login("second@school.edu", "pw", Role::Teacher)
        .await
        .expect("second login");

    assert!(matches!(first.await.expect("join"), Err(AuthError::Superseded)));
    assert_eq!(auth.user().await, Some(second));
}

#[tokio::test]
async fn offline_access_sets_flag_and_logout_clears_both_keys() {
    let store = Arc::new(MemorySessionStore::new());
    let auth = service(store.clone());

    let user = auth.offline_access().await.expect("offline");
    assert_eq!(user.id, "offline-user");
    assert_eq!(user.xp, Some(0));
    assert!(auth.session().await.offline);
    assert_eq!(
        store.read(OFFLINE_MODE_KEY).await.expect("read").as_deref(),
        Some("true")
    );

    auth.logout().await.expect("logout");
    assert_eq!(auth.session().await, Session::default());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn restore_reads_persisted_session() {
    let store = Arc::new(MemorySessionStore::new());
    service(store.clone())
        .offline_access()
        .await
        .expect("offline");

    let fresh = service(store);
    let session = fresh.restore().await.expect("restore");
    assert!(session.offline);
    assert_eq!(
        session.user.map(|user| user.name),
        Some("Offline Student".to_string())
    );
}

#[tokio::test]
async fn restore_discards_corrupt_record() {
    let store = Arc::new(MemorySessionStore::new());
    store.write(USER_KEY, "{not json").await.expect("write");
    store.write(OFFLINE_MODE_KEY, "true").await.expect("write");

    let auth = service(store.clone());
    let session = auth.restore().await.expect("restore");
    assert!(!session.is_authenticated());
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn storage_failure_surfaces_and_keeps_session_empty() {
    let auth = AuthService::with_login_delay(Arc::new(FailingStore), Duration::from_millis(5));
    let err = auth
        .login("a@b.c", "pw", Role::Student)
        .await
        .expect_err("storage failure");
    assert!(matches!(err, AuthError::Storage(_)));
    assert!(!auth.is_authenticated().await);
    assert!(auth.restore().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn partial_write_is_rolled_back() {
    let store = Arc::new(FlagRejectingStore {
        inner: MemorySessionStore::new(),
    });
    let auth = AuthService::with_login_delay(store.clone(), Duration::from_millis(5));

    let err = auth
        .login("asha@school.edu", "pw", Role::Student)
        .await
        .expect_err("flag removal fails");
    assert!(matches!(err, AuthError::Storage(_)));
    assert!(!auth.is_authenticated().await);
    assert_eq!(store.read(USER_KEY).await.expect("read"), None);

    assert!(auth.offline_access().await.is_err());
    assert!(!auth.is_authenticated().await);
    assert_eq!(store.read(USER_KEY).await.expect("read"), None);

    let restored = auth.restore().await.expect("restore");
    assert!(!restored.is_authenticated());
}
