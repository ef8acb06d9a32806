//! Auth routes: sign-up, sign-in, sign-out, password reset, session lookup.
//!
//! Every provider failure is logged and answered with one fixed message per
//! operation; the browser never sees the provider's own wording.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use panels::Account;
use panels::form::{LOG_OUT_FAILED, RESET_FAILED, SIGN_IN_FAILED, SIGN_UP_FAILED, validate_signup};
use panels::wire::{LoginRequest, ResetPasswordRequest, SignupRequest};
use time::Duration;

use super::error::ApiError;
use crate::state::AppState;

pub const COOKIE_NAME: &str = "session_token";
const NOT_SIGNED_IN: &str = "Not signed in";

/// Session cookie that expires with the server-side session.
fn session_cookie(token: String, secure: bool, ttl: std::time::Duration) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::try_from(ttl).unwrap_or(Duration::MAX))
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Account behind the request's session cookie, if any.
pub async fn session_account(state: &AppState, jar: &CookieJar) -> Option<Account> {
    let token = jar.get(COOKIE_NAME).map(Cookie::value)?;
    if token.is_empty() {
        return None;
    }
    state.sessions.validate(token).await
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated account extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub account: Account,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::Unauthorized(NOT_SIGNED_IN));
        }

        let app_state = AppState::from_ref(state);
        let account = app_state
            .sessions
            .validate(token)
            .await
            .ok_or(ApiError::Unauthorized(NOT_SIGNED_IN))?;

        Ok(Self { account, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/signup`: validate, create the account, start a session.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<Account>), ApiError> {
    validate_signup(&req.email, &req.password, &req.confirm_password)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let account = state
        .accounts
        .sign_up(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "sign-up failed");
            ApiError::Conflict(SIGN_UP_FAILED)
        })?;

    let token = state.sessions.create(account.clone()).await;
    tracing::info!(account_id = %account.id, "account created");
    let jar = jar.add(session_cookie(token, state.cookie_secure, state.sessions.ttl()));
    Ok((StatusCode::CREATED, jar, Json(account)))
}

/// `POST /api/auth/login`: check credentials, start a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Account>), ApiError> {
    let account = state
        .accounts
        .sign_in(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "sign-in failed");
            ApiError::Unauthorized(SIGN_IN_FAILED)
        })?;

    let token = state.sessions.create(account.clone()).await;
    tracing::info!(account_id = %account.id, "signed in");
    let jar = jar.add(session_cookie(token, state.cookie_secure, state.sessions.ttl()));
    Ok((jar, Json(account)))
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> (CookieJar, StatusCode) {
    if !state.sessions.delete(&auth.token).await {
        tracing::warn!(account_id = %auth.account.id, "{LOG_OUT_FAILED}: session already gone");
    }
    let jar = CookieJar::new().add(cleared_cookie(state.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

/// `POST /api/auth/reset-password`: ask the provider to mail reset instructions.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .accounts
        .request_password_reset(&req.email)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "password reset failed");
            ApiError::BadRequest(RESET_FAILED.to_owned())
        })?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`: return the signed-in account.
pub async fn me(auth: AuthUser) -> Json<Account> {
    Json(auth.account)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
