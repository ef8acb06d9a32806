//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the account provider, the realtime store, and the session table.
//! Both collaborators are trait objects chosen once at startup.

use std::sync::Arc;

use crate::config::{BackendKind, ConfigError, ServerConfig};
use crate::services::accounts::{AccountProvider, AuthError, MemoryAccounts};
use crate::services::identity::FirebaseAccounts;
use crate::services::rtdb::FirebaseStore;
use crate::services::session::SessionStore;
use crate::services::store::{MemoryStore, RealtimeStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("account provider init failed: {0}")]
    Accounts(#[from] AuthError),
    #[error("store request failed: {0}")]
    Store(#[from] StoreError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state. Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountProvider>,
    pub store: Arc<dyn RealtimeStore>,
    pub sessions: SessionStore,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountProvider>, store: Arc<dyn RealtimeStore>, cookie_secure: bool) -> Self {
        Self { accounts, store, sessions: SessionStore::new(), cookie_secure }
    }

    /// Build the configured backends.
    ///
    /// # Errors
    ///
    /// Returns an error if the Firebase settings are missing or an HTTP
    /// client cannot be constructed.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StartupError> {
        let (accounts, store): (Arc<dyn AccountProvider>, Arc<dyn RealtimeStore>) = match config.backend {
            BackendKind::Memory => (Arc::new(MemoryAccounts::new()), Arc::new(MemoryStore::new())),
            BackendKind::Firebase => {
                let firebase = config
                    .firebase
                    .as_ref()
                    .ok_or(ConfigError::Missing { var: "FIREBASE_DATABASE_URL" })?;
                (
                    Arc::new(FirebaseAccounts::new(firebase.api_key.clone(), config.timeouts)?),
                    Arc::new(FirebaseStore::new(firebase, config.timeouts)?),
                )
            }
        };
        Ok(Self::new(accounts, store, config.cookie_secure))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
