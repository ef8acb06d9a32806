//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics. Auth failures
//! come back as the server's fixed message so pages can show it verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use panels::{Account, PendingWrite};
#[cfg(any(test, feature = "hydrate"))]
use panels::{PANELS_PATH, PanelKey, PanelWrites};

/// How a pending write reaches the server.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, PartialEq)]
enum WriteRequest<'a> {
    /// `PUT /api/panels/{key}` with the full panel object.
    Put { url: String, body: serde_json::Value },
    /// `PATCH /api/panels` with every panel in one atomic update.
    Patch { url: String, body: &'a PanelWrites },
}

#[cfg(any(test, feature = "hydrate"))]
fn panels_endpoint() -> String {
    format!("/api/{PANELS_PATH}")
}

#[cfg(any(test, feature = "hydrate"))]
fn panel_endpoint(key: PanelKey) -> String {
    format!("/api/{}", key.path(PANELS_PATH))
}

#[cfg(any(test, feature = "hydrate"))]
fn write_request(pending: &PendingWrite) -> Option<WriteRequest<'_>> {
    if pending.is_bulk() {
        return Some(WriteRequest::Patch { url: panels_endpoint(), body: &pending.writes });
    }
    let (key, panel) = pending.writes.iter().next()?;
    Some(WriteRequest::Put { url: panel_endpoint(*key), body: panel.to_value() })
}

#[cfg(any(test, feature = "hydrate"))]
fn write_failed_message(status: u16) -> String {
    format!("panel write failed: {status}")
}

/// Server error text from a JSON error body, or `fallback`.
#[cfg(any(test, feature = "hydrate"))]
fn error_text(body: Option<panels::wire::ErrorBody>, fallback: &str) -> String {
    body.map(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

/// Log an undecodable success body and fall back to the view's banner text.
#[cfg(any(test, feature = "hydrate"))]
fn decode_failed(detail: &dyn std::fmt::Display, banner: &str) -> String {
    #[cfg(feature = "hydrate")]
    log::error!("account response decode failed: {detail}");
    #[cfg(not(feature = "hydrate"))]
    let _ = detail;
    banner.to_owned()
}

#[cfg(feature = "hydrate")]
async fn read_error(resp: gloo_net::http::Response, fallback: &str) -> String {
    error_text(resp.json::<panels::wire::ErrorBody>().await.ok(), fallback)
}

/// Fetch the signed-in account from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_account() -> Option<Account> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Account>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign in via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns the message to show in the sign-in banner.
pub async fn login(email: &str, password: &str) -> Result<Account, String> {
    #[cfg(feature = "hydrate")]
    {
        use panels::form::SIGN_IN_FAILED;

        let payload = panels::wire::LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .json(&payload)
            .map_err(|_| SIGN_IN_FAILED.to_owned())?
            .send()
            .await
            .map_err(|_| SIGN_IN_FAILED.to_owned())?;
        if !resp.ok() {
            return Err(read_error(resp, SIGN_IN_FAILED).await);
        }
        resp.json::<Account>().await.map_err(|e| decode_failed(&e, SIGN_IN_FAILED))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}

/// Create an account via `POST /api/auth/signup`.
///
/// # Errors
///
/// Returns the message to show in the sign-up banner.
pub async fn signup(email: &str, password: &str, confirm_password: &str) -> Result<Account, String> {
    #[cfg(feature = "hydrate")]
    {
        use panels::form::SIGN_UP_FAILED;

        let payload = panels::wire::SignupRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm_password.to_owned(),
        };
        let resp = gloo_net::http::Request::post("/api/auth/signup")
            .json(&payload)
            .map_err(|_| SIGN_UP_FAILED.to_owned())?
            .send()
            .await
            .map_err(|_| SIGN_UP_FAILED.to_owned())?;
        if !resp.ok() {
            return Err(read_error(resp, SIGN_UP_FAILED).await);
        }
        resp.json::<Account>().await.map_err(|e| decode_failed(&e, SIGN_UP_FAILED))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password, confirm_password);
        Err("not available on server".to_owned())
    }
}

/// Ask for password-reset mail via `POST /api/auth/reset-password`.
///
/// # Errors
///
/// Returns the message to show in the reset banner.
pub async fn reset_password(email: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use panels::form::RESET_FAILED;

        let payload = panels::wire::ResetPasswordRequest { email: email.to_owned() };
        let resp = gloo_net::http::Request::post("/api/auth/reset-password")
            .json(&payload)
            .map_err(|_| RESET_FAILED.to_owned())?
            .send()
            .await
            .map_err(|_| RESET_FAILED.to_owned())?;
        if !resp.ok() {
            return Err(read_error(resp, RESET_FAILED).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn logout() -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("logout failed: {}", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Send an optimistic write to the store through the server.
///
/// # Errors
///
/// Returns an error string if the request fails or the server refuses it.
pub async fn send_pending(pending: &PendingWrite) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let request = match write_request(pending) {
            Some(WriteRequest::Put { url, body }) => gloo_net::http::Request::put(&url).json(&body),
            Some(WriteRequest::Patch { url, body }) => gloo_net::http::Request::patch(&url).json(body),
            None => return Ok(()),
        };
        let resp = request
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(write_failed_message(resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = pending;
        Err("not available on server".to_owned())
    }
}

/// Seconds a write-failure banner stays up.
pub const BANNER_SECS: u64 = 4;

/// Issue a staged write and settle it when the server answers.
///
/// Failures revert the optimistic change and raise a banner that clears
/// itself after [`BANNER_SECS`].
pub fn spawn_write(panels: leptos::prelude::RwSignal<crate::state::panels::PanelsState>, pending: PendingWrite) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use leptos::prelude::Update;

        let result = send_pending(&pending).await;
        if let Err(e) = &result {
            log::warn!("panel write {} failed: {e}", pending.id);
        }
        let mut raised = None;
        panels.update(|s| raised = s.settle(pending.id, result));
        if let Some(seq) = raised {
            gloo_timers::future::sleep(std::time::Duration::from_secs(BANNER_SECS)).await;
            panels.update(|s| s.dismiss_error(seq));
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (panels, pending);
    }
}
