use crate::auth::jwt;
use crate::auth::storage::{KeyValueStore, MemoryStore};
use crate::types::{AppError, Result, Theme, UserIdentity};
use std::sync::Arc;
use tracing::{debug, warn};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_DATA_KEY: &str = "userData";
pub const THEME_KEY: &str = "theme";

/// Holds the access/refresh token pair and the cached identity.
///
/// Tokens and identity live in the session store. The preference store is
/// only touched by [`TokenStore::clear`], which wipes it but carries the
/// theme across.
#[derive(Clone)]
pub struct TokenStore {
    session: Arc<dyn KeyValueStore>,
    preferences: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(session: Arc<dyn KeyValueStore>, preferences: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session,
            preferences,
        }
    }

    /// Store backed by two fresh in-memory maps.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Writes whichever tokens are given and leaves the other untouched.
    pub fn set_tokens(&self, access: Option<&str>, refresh: Option<&str>) -> Result<()> {
        if let Some(token) = access {
            self.session.set(ACCESS_TOKEN_KEY, token)?;
        }
        if let Some(token) = refresh {
            self.session.set(REFRESH_TOKEN_KEY, token)?;
        }
        Ok(())
    }

    /// Extracts the identity claims of an access token. No signature check.
    pub fn decode_identity(&self, access_token: &str) -> Result<UserIdentity> {
        jwt::decode_identity(access_token)
    }

    /// Identity cached at the last login, if it still parses.
    pub fn cached_identity(&self) -> Option<UserIdentity> {
        let raw = self.read(USER_DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("Discarding unreadable cached identity: {}", e);
                None
            }
        }
    }

    pub fn store_identity(&self, identity: &UserIdentity) -> Result<()> {
        let raw = serde_json::to_string(identity).map_err(|e| AppError::Storage(e.to_string()))?;
        self.session.set(USER_DATA_KEY, &raw)
    }

    /// Removes both tokens and the cached identity, keeping the theme.
    pub fn clear(&self) -> Result<()> {
        self.session.clear()?;

        let theme = self.preferences.get(THEME_KEY)?;
        self.preferences.clear()?;
        if let Some(theme) = theme {
            self.preferences.set(THEME_KEY, &theme)?;
        }

        debug!("Token store cleared");
        Ok(())
    }

    /// Current theme, defaulting to light when unset or unrecognized.
    pub fn theme(&self) -> Theme {
        self.preferences
            .get(THEME_KEY)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.preferences.set(THEME_KEY, theme.as_str())
    }

    /// Direct access to the preference store.
    pub fn preferences(&self) -> &Arc<dyn KeyValueStore> {
        &self.preferences
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.session.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Error retrieving {}: {}", key, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_access_token", &self.access_token().is_some())
            .field("has_refresh_token", &self.refresh_token().is_some())
            .finish()
    }
}
