//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the session guard and the dashboard header to coordinate login
//! redirects and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use panels::Account;

/// Authentication state tracking the signed-in account and lookup status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub account: Option<Account>,
    /// `true` until the first `/api/auth/me` lookup has finished.
    pub loading: bool,
}

impl AuthState {
    /// State before the session lookup has answered.
    #[must_use]
    pub fn pending() -> Self {
        Self { account: None, loading: true }
    }

    #[must_use]
    pub fn resolved(account: Option<Account>) -> Self {
        Self { account, loading: false }
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.email.as_str())
    }
}
