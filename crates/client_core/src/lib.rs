use std::sync::Arc;

use shared::{
    domain::{GameKind, Role, User},
    navigation::{NavEvent, Screen},
};
use storage::SessionStore;

pub mod auth;
pub mod catalog;
pub mod games;
pub mod i18n;
pub mod navigation;

pub use auth::{AuthError, AuthService, Session, DEFAULT_LOGIN_DELAY};
pub use i18n::{I18nError, Translator};
pub use navigation::{NavigationController, NavigationState};

use catalog::Mailbox;
use games::{AlgebraPuzzle, MotionSimulation};

/// One signed-in client: session, navigation, and the per-screen state the
/// renderer works against.
pub struct LearningClient {
    auth: AuthService,
    navigation: NavigationController,
    translator: Translator,
    algebra: AlgebraPuzzle,
    motion: MotionSimulation,
    mailbox: Mailbox,
    /// Id of the user navigation was initialized for.
    navigation_owner: Option<String>,
}

impl LearningClient {
    pub fn new(auth: AuthService, translator: Translator) -> Self {
        Self {
            auth,
            navigation: NavigationController::new(),
            translator,
            algebra: AlgebraPuzzle::new(),
            motion: MotionSimulation::new(),
            mailbox: Mailbox::with_sample_mail(),
            navigation_owner: None,
        }
    }

    pub fn with_store(store: Arc<dyn SessionStore>, translator: Translator) -> Self {
        Self::new(AuthService::new(store), translator)
    }

    pub async fn restore_session(&mut self) -> Result<Screen, AuthError> {
        self.auth.restore().await?;
        Ok(self.sync_session().await)
    }

    pub async fn login(
        &mut self,
        identifier: &str,
        secret: &str,
        role: Role,
    ) -> Result<Screen, AuthError> {
        self.auth.login(identifier, secret, role).await?;
        Ok(self.sync_session().await)
    }

    pub async fn offline_access(&mut self) -> Result<Screen, AuthError> {
        self.auth.offline_access().await?;
        Ok(self.sync_session().await)
    }

    pub async fn logout(&mut self) -> Result<Screen, AuthError> {
        let outcome = self.auth.logout().await;
        let screen = self.sync_session().await;
        outcome.map(|()| screen)
    }

    /// Applies a navigation event for the signed-in user. Without a session the
    /// event is dropped and the login screen stays up.
    pub async fn navigate(&mut self, event: NavEvent) -> Screen {
        let Some(role) = self.auth.session().await.role() else {
            return self.navigation.screen();
        };

        if let NavEvent::PlayGame(kind) = &event {
            match kind {
                GameKind::AlgebraPuzzle => self.algebra.reset(),
                GameKind::MotionSimulation => self.motion.reset(),
            }
        }
        self.navigation.apply(role, event)
    }

    /// Reconciles navigation with the session. A user other than the one
    /// navigation was initialized for starts over from their landing view;
    /// losing the session resets everything.
    async fn sync_session(&mut self) -> Screen {
        let session = self.auth.session().await;
        let Some(user) = session.user else {
            let had_owner = self.navigation_owner.take().is_some();
            if had_owner || self.navigation.state().is_initialized() {
                self.reset_views();
            }
            return self.navigation.screen();
        };

        if self.navigation_owner.as_deref() == Some(user.id.as_str())
            && self.navigation.state().is_initialized()
        {
            return self.navigation.screen();
        }

        self.reset_views();
        self.navigation_owner = Some(user.id);
        self.navigation.apply(user.role, NavEvent::SessionAuthenticated)
    }

    fn reset_views(&mut self) {
        self.algebra.reset();
        self.motion.reset();
        self.navigation.reset();
    }

    pub fn screen(&self) -> Screen {
        self.navigation.screen()
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub async fn session(&self) -> Session {
        self.auth.session().await
    }

    pub async fn user(&self) -> Option<User> {
        self.auth.user().await
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn translator_mut(&mut self) -> &mut Translator {
        &mut self.translator
    }

    pub fn algebra(&self) -> &AlgebraPuzzle {
        &self.algebra
    }

    pub fn algebra_mut(&mut self) -> &mut AlgebraPuzzle {
        &mut self.algebra
    }

    pub fn motion(&self) -> &MotionSimulation {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionSimulation {
        &mut self.motion
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub fn mailbox_mut(&mut self) -> &mut Mailbox {
        &mut self.mailbox
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
