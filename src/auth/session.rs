//! Session controller: the single owner of "is a user signed in".

use crate::auth::store::TokenStore;
use crate::types::{AppError, Result, UserIdentity};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Where a session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup, before [`SessionController::bootstrap`] has run.
    Initializing,
    Authenticated(UserIdentity),
    Unauthenticated,
}

/// View-layer hook for the forced redirect to the unauthenticated entry point.
pub trait Navigator: Send + Sync {
    fn redirect_to_entry(&self);
}

/// Navigator for callers without a view, e.g. background jobs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedNavigator;

impl Navigator for DetachedNavigator {
    fn redirect_to_entry(&self) {
        warn!("Session ended outside a view; nothing to redirect");
    }
}

/// Why a session is being torn down from outside `logout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A protected call found no credentials. Forces a redirect.
    MissingCredentials,
    /// The server answered 401.
    Unauthorized,
    /// The server answered 500.
    ServerFault,
}

/// Establishes, queries and ends the session.
///
/// Share one instance behind an `Arc`; the API gateway holds a clone to end
/// the session on auth failures.
pub struct SessionController {
    store: TokenStore,
    state: watch::Sender<SessionState>,
    navigator: Arc<dyn Navigator>,
}

impl SessionController {
    pub fn new(store: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self {
            store,
            state,
            navigator,
        }
    }

    /// Reconciles with persisted tokens. No network call.
    ///
    /// Returns whether a session was restored. Any partial or undecodable
    /// state is wiped.
    pub fn bootstrap(&self) -> bool {
        let access = self.store.access_token();
        let refresh = self.store.refresh_token();

        let (Some(access), Some(_)) = (access, refresh) else {
            info!("No stored token pair, starting unauthenticated");
            self.reset();
            return false;
        };

        match self.store.decode_identity(&access) {
            Ok(identity) => {
                info!(
                    user = identity.user_name.as_deref().unwrap_or("unknown"),
                    "Session restored"
                );
                self.state.send_replace(SessionState::Authenticated(identity));
                true
            }
            Err(e) => {
                warn!("Stored access token is unusable: {}", e);
                self.reset();
                false
            }
        }
    }

    /// Starts a session from a freshly issued access token.
    ///
    /// A successful network login does not guarantee this succeeds: an
    /// undecodable token clears the store and yields `InvalidToken`.
    pub fn login(&self, access_token: &str) -> Result<UserIdentity> {
        let identity = match self.store.decode_identity(access_token) {
            Ok(identity) => identity,
            Err(e) => {
                error!("Login failed: {}", e);
                self.reset();
                return Err(AppError::InvalidToken(
                    "unable to extract user information".to_string(),
                ));
            }
        };

        if let Err(e) = self
            .store
            .set_tokens(Some(access_token), None)
            .and_then(|_| self.store.store_identity(&identity))
        {
            error!("Failed to persist session: {}", e);
            self.reset();
            return Err(e);
        }

        info!(
            user = identity.user_name.as_deref().unwrap_or("unknown"),
            role = identity.role.as_deref().unwrap_or("unknown"),
            "User logged in successfully"
        );
        self.state
            .send_replace(SessionState::Authenticated(identity.clone()));
        Ok(identity)
    }

    /// Clears everything but the theme. Safe to call repeatedly.
    pub fn logout(&self) {
        self.reset();
        info!("User logged out successfully");
    }

    /// Tears the session down on behalf of the API gateway.
    pub fn end_session(&self, reason: SessionEnd) {
        warn!(?reason, "Ending session");
        self.reset();
        if reason == SessionEnd::MissingCredentials {
            self.navigator.redirect_to_entry();
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Initializing)
    }

    pub fn user(&self) -> Option<UserIdentity> {
        match &*self.state.borrow() {
            SessionState::Authenticated(identity) => Some(identity.clone()),
            _ => None,
        }
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    fn reset(&self) {
        if let Err(e) = self.store.clear() {
            error!("Failed to clear token store: {}", e);
        }
        self.state.send_replace(SessionState::Unauthenticated);
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &*self.state.borrow())
            .field("store", &self.store)
            .finish()
    }
}
