//! Firebase Identity Toolkit client.
//!
//! Thin HTTP wrapper over the `accounts:*` REST endpoints. Error mapping is
//! kept in `parse_error` for testability.

use std::time::Duration;

use panels::Account;
use serde::{Deserialize, Serialize};

use super::accounts::{AccountProvider, AuthError};
use crate::config::HttpTimeouts;

const API_BASE: &str = "https://identitytoolkit.googleapis.com/v1";

pub struct FirebaseAccounts {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirebaseAccounts {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, timeouts: HttpTimeouts) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| AuthError::Request(e.to_string()))?;
        Ok(Self { http, api_key, base_url: API_BASE.to_owned() })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/accounts:{method}", self.base_url)
    }

    async fn post<B: Serialize + Sync>(&self, method: &str, body: &B) -> Result<String, AuthError> {
        let response = self
            .http
            .post(self.endpoint(method))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        if status != 200 {
            return Err(parse_error(status, &text));
        }
        Ok(text)
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> Result<Account, AuthError> {
        let body = PasswordRequest { email, password, return_secure_token: true };
        let text = self.post(method, &body).await?;
        parse_account(&text)
    }
}

#[async_trait::async_trait]
impl AccountProvider for FirebaseAccounts {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.password_call("signInWithPassword", email, password)
            .await
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let body = OobRequest { request_type: "PASSWORD_RESET", email };
        self.post("sendOobCode", &body).await.map(|_| ())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobRequest<'a> {
    request_type: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

pub(crate) fn parse_account(text: &str) -> Result<Account, AuthError> {
    let parsed: AccountResponse = serde_json::from_str(text).map_err(|e| AuthError::Request(e.to_string()))?;
    Ok(Account { id: parsed.local_id, email: parsed.email })
}

/// Map an Identity Toolkit error body onto [`AuthError`].
///
/// Messages look like `EMAIL_EXISTS` or `WEAK_PASSWORD : Password should be ...`.
pub(crate) fn parse_error(status: u16, body: &str) -> AuthError {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return AuthError::Provider { status, message: body.to_owned() };
    };
    let message = envelope.error.message;
    let code = message.split(':').next().unwrap_or_default().trim();
    match code {
        "EMAIL_EXISTS" => AuthError::EmailExists,
        "EMAIL_NOT_FOUND" => AuthError::EmailNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => AuthError::InvalidCredentials,
        "WEAK_PASSWORD" => AuthError::WeakPassword,
        "INVALID_EMAIL" | "MISSING_EMAIL" => AuthError::InvalidEmail,
        _ => AuthError::Provider { status, message },
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
