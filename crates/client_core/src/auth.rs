//! Session service: mock sign-in, offline access and logout, persisted through
//! an injected [`SessionStore`].

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::domain::{Grade, Role, User};
use storage::{SessionStore, OFFLINE_MODE_KEY, USER_KEY};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);
const STUDENT_START_GRADE: u8 = 9;
const STUDENT_START_XP: u32 = 1250;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identifier and secret are both required")]
    MissingCredentials,
    #[error("login attempt superseded by a newer session change")]
    Superseded,
    #[error("session record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("session storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub offline: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }
}

pub struct AuthService {
    store: Arc<dyn SessionStore>,
    session: RwLock<Session>,
    // Bumped by every session change; a login only lands if its ticket is still current.
    attempts: AtomicU64,
    login_delay: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_login_delay(store, DEFAULT_LOGIN_DELAY)
    }

    pub fn with_login_delay(store: Arc<dyn SessionStore>, login_delay: Duration) -> Self {
        Self {
            store,
            session: RwLock::new(Session::default()),
            attempts: AtomicU64::new(0),
            login_delay,
        }
    }

    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub async fn user(&self) -> Option<User> {
        self.session.read().await.user.clone()
    }

    /// Loads a previously persisted session. Corrupt records are discarded.
    pub async fn restore(&self) -> Result<Session, AuthError> {
        let raw_user = self.store.read(USER_KEY).await?;
        let raw_offline = self.store.read(OFFLINE_MODE_KEY).await?;

        let parsed = raw_user
            .as_deref()
            .map(|raw| serde_json::from_str::<User>(raw));
        let user = match parsed {
            None => None,
            Some(Ok(user)) => Some(user),
            Some(Err(err)) => {
                warn!(error = %err, "discarding unreadable session record");
                self.store.remove(USER_KEY).await?;
                self.store.remove(OFFLINE_MODE_KEY).await?;
                return Ok(self.session().await);
            }
        };
        let offline = raw_offline
            .as_deref()
            .and_then(|raw| serde_json::from_str::<bool>(raw).ok())
            .unwrap_or(false);

        let mut session = self.session.write().await;
        *session = Session { user, offline };
        if let Some(user) = &session.user {
            info!(user_id = %user.id, role = user.role.as_str(), offline, "restored session");
        }
        Ok(session.clone())
    }

    /// Simulated sign-in. Fails without touching the session when credentials are
    /// blank, when storage fails, or when a logout, offline switch or newer login
    /// happened while this one was in flight.
    pub async fn login(&self, identifier: &str, secret: &str, role: Role) -> Result<User, AuthError> {
        let identifier = identifier.trim();
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let ticket = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        info!(identifier, role = role.as_str(), "login attempted");
        tokio::time::sleep(self.login_delay).await;

        let mut session = self.session.write().await;
        if self.attempts.load(Ordering::SeqCst) != ticket {
            warn!(identifier, "login resolved after a newer session change; dropped");
            return Err(AuthError::Superseded);
        }

        let user = mock_user(identifier, role);
        self.persist(&user, false).await?;

        *session = Session {
            user: Some(user.clone()),
            offline: false,
        };
        info!(user_id = %user.id, role = role.as_str(), "login succeeded");
        Ok(user)
    }

    pub async fn offline_access(&self) -> Result<User, AuthError> {
        let mut session = self.session.write().await;
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let user = User {
            id: "offline-user".to_string(),
            email: "offline@student.local".to_string(),
            name: "Offline Student".to_string(),
            role: Role::Student,
            grade: Grade::new(STUDENT_START_GRADE).ok(),
            xp: Some(0),
        };
        self.persist(&user, true).await?;

        *session = Session {
            user: Some(user.clone()),
            offline: true,
        };
        info!("offline access enabled");
        Ok(user)
    }

    /// Clears the in-memory session first; storage errors are still reported.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let mut session = self.session.write().await;
        self.attempts.fetch_add(1, Ordering::SeqCst);
        *session = Session::default();
        drop(session);

        self.store.remove(USER_KEY).await?;
        self.store.remove(OFFLINE_MODE_KEY).await?;
        info!("user logged out");
        Ok(())
    }

    /// Writes the user record and the offline flag. If the flag cannot be
    /// stored the user record is removed again, so a later `restore` never
    /// picks up a half-written session.
    async fn persist(&self, user: &User, offline: bool) -> Result<(), AuthError> {
        let record = serde_json::to_string(user)?;
        let flag = serde_json::to_string(&true)?;
        self.store.write(USER_KEY, &record).await?;

        let flag_result = if offline {
            self.store.write(OFFLINE_MODE_KEY, &flag).await
        } else {
            self.store.remove(OFFLINE_MODE_KEY).await
        };
        if let Err(err) = flag_result {
            if let Err(cleanup) = self.store.remove(USER_KEY).await {
                warn!(error = %cleanup, "failed to roll back partial session record");
            }
            return Err(err.into());
        }
        Ok(())
    }
}

fn mock_user(identifier: &str, role: Role) -> User {
    let name = identifier.split('@').next().unwrap_or(identifier).to_string();
    let is_student = role == Role::Student;
    User {
        id: uuid::Uuid::new_v4().simple().to_string(),
        email: identifier.to_string(),
        name,
        role,
        grade: if is_student {
            Grade::new(STUDENT_START_GRADE).ok()
        } else {
            None
        },
        xp: is_student.then_some(STUDENT_START_XP),
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
