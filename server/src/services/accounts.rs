//! Account provider seam.
//!
//! ARCHITECTURE
//! ============
//! Identity is owned by an external provider. Routes only see the
//! [`AccountProvider`] trait; `main` picks the in-process [`MemoryAccounts`]
//! or the Firebase Identity Toolkit client from configuration.
//!
//! Sign-out has no provider call: the server session is simply discarded.

use std::collections::HashMap;

use panels::Account;
use rand::Rng;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::session::bytes_to_hex;

/// Errors surfaced by account provider operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already in use")]
    EmailExists,
    #[error("no account for email")]
    EmailNotFound,
    #[error("password rejected by provider")]
    WeakPassword,
    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },
    #[error("provider request failed: {0}")]
    Request(String),
}

#[async_trait::async_trait]
pub trait AccountProvider: Send + Sync {
    /// Create an account and return it signed in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Account, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError>;

    /// Ask the provider to send password-reset instructions.
    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

// =============================================================================
// MEMORY PROVIDER
// =============================================================================

struct StoredAccount {
    id: String,
    salt: String,
    digest: String,
}

/// In-process account provider used for local development and tests.
///
/// Passwords are kept as salted SHA-256 digests. Reset requests are recorded
/// instead of mailed.
#[derive(Default)]
pub struct MemoryAccounts {
    accounts: RwLock<HashMap<String, StoredAccount>>,
    resets: RwLock<Vec<String>>,
}

impl MemoryAccounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails that have requested a password reset, oldest first.
    pub async fn reset_requests(&self) -> Vec<String> {
        self.resets.read().await.clone()
    }
}

pub(crate) fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[async_trait::async_trait]
impl AccountProvider for MemoryAccounts {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailExists);
        }
        let salt = generate_salt();
        let stored = StoredAccount { id: Uuid::new_v4().to_string(), digest: hash_password(&salt, password), salt };
        let account = Account { id: stored.id.clone(), email: email.clone() };
        accounts.insert(email, stored);
        Ok(account)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;
        let accounts = self.accounts.read().await;
        let stored = accounts.get(&email).ok_or(AuthError::InvalidCredentials)?;
        if hash_password(&stored.salt, password) != stored.digest {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Account { id: stored.id.clone(), email })
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
        if !self.accounts.read().await.contains_key(&email) {
            return Err(AuthError::EmailNotFound);
        }
        tracing::info!(%email, "password reset requested");
        self.resets.write().await.push(email);
        Ok(())
    }
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
