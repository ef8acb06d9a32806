//! Browser session management.
//!
//! ARCHITECTURE
//! ============
//! A successful sign-in or sign-up creates an opaque random token that maps
//! to the provider's account. The token travels in an HttpOnly cookie; the
//! account itself never leaves the server except through `/api/auth/me`.
//!
//! TRADE-OFFS
//! ==========
//! Sessions are process memory only. A restart signs everyone out, which
//! matches the provider-owned account lifecycle: nothing about an account is
//! persisted here.
//!
//! EXPIRY
//! ======
//! Every session lives for a fixed TTL from creation. Expired tokens are
//! rejected and removed on lookup, and each new sign-in sweeps the rest, so
//! the table stays bounded by the sign-ins of one TTL window.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use panels::Account;
use rand::Rng;
use tokio::sync::RwLock;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Lifetime of a session from sign-in.
pub const SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

struct Session {
    account: Account,
    created_at: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { sessions: Arc::default(), ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_live(&self, session: &Session) -> bool {
        session.created_at.elapsed() < self.ttl
    }

    /// Create a session for the given account, returning the token.
    ///
    /// Expired sessions are swept first.
    pub async fn create(&self, account: Account) -> String {
        let token = generate_token();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| self.is_live(session));
        sessions.insert(token.clone(), Session { account, created_at: Instant::now() });
        token
    }

    /// Account behind a token, if the session exists and has not expired.
    pub async fn validate(&self, token: &str) -> Option<Account> {
        {
            let sessions = self.sessions.read().await;
            let session = sessions.get(token)?;
            if self.is_live(session) {
                return Some(session.account.clone());
            }
        }
        self.sessions.write().await.remove(token);
        None
    }

    /// Delete a session by token. Returns `false` if it did not exist.
    pub async fn delete(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
