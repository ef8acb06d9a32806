use std::sync::Arc;

use super::*;
use crate::services::store::MemoryStore;
use crate::state::test_helpers::{CountingAccounts, test_app_state, test_app_state_with};
use axum::extract::FromRequestParts;
use axum::http::{Request, header};

fn signup_req(email: &str, password: &str, confirm: &str) -> Json<SignupRequest> {
    Json(SignupRequest { email: email.into(), password: password.into(), confirm_password: confirm.into() })
}

fn login_req(email: &str, password: &str) -> Json<LoginRequest> {
    Json(LoginRequest { email: email.into(), password: password.into() })
}

fn counting_state() -> (AppState, Arc<CountingAccounts>) {
    let accounts = Arc::new(CountingAccounts::default());
    let state = test_app_state_with(accounts.clone(), Arc::new(MemoryStore::new()));
    (state, accounts)
}

fn token_of(jar: &CookieJar) -> String {
    jar.get(COOKIE_NAME).unwrap().value().to_owned()
}

async fn extract(state: &AppState, cookie: Option<&str>) -> Result<AuthUser, ApiError> {
    let mut builder = Request::builder().uri("/api/auth/me");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let (mut parts, ()) = builder.body(()).unwrap().into_parts();
    AuthUser::from_request_parts(&mut parts, state).await
}

// =============================================================================
// signup
// =============================================================================

#[tokio::test]
async fn signup_creates_session_and_account() {
    let state = test_app_state();
    let (status, jar, Json(account)) = signup(State(state.clone()), CookieJar::new(), signup_req("a@b.com", "secret1", "secret1"))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(account.email, "a@b.com");
    assert_eq!(state.sessions.validate(&token_of(&jar)).await, Some(account));
}

#[tokio::test]
async fn login_cookie_expires_with_session() {
    let state = test_app_state();
    signup(State(state.clone()), CookieJar::new(), signup_req("a@b.com", "secret1", "secret1"))
        .await
        .unwrap();
    let (jar, _) = login(State(state.clone()), CookieJar::new(), login_req("a@b.com", "secret1"))
        .await
        .unwrap();
    let max_age = jar.get(COOKIE_NAME).unwrap().max_age().unwrap();
    assert_eq!(max_age, Duration::try_from(state.sessions.ttl()).unwrap());
}

#[tokio::test]
async fn signup_then_login_with_same_credentials_succeeds() {
    let state = test_app_state();
    signup(State(state.clone()), CookieJar::new(), signup_req("a@b.com", "secret1", "secret1"))
        .await
        .unwrap();
    let (_, Json(account)) = login(State(state), CookieJar::new(), login_req("a@b.com", "secret1"))
        .await
        .unwrap();
    assert_eq!(account.email, "a@b.com");
}

#[tokio::test]
async fn second_signup_with_same_email_conflicts() {
    let state = test_app_state();
    signup(State(state.clone()), CookieJar::new(), signup_req("a@b.com", "secret1", "secret1"))
        .await
        .unwrap();
    let err = signup(State(state), CookieJar::new(), signup_req("a@b.com", "other12", "other12"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.message(), SIGN_UP_FAILED);
}

#[tokio::test]
async fn short_password_never_reaches_provider() {
    let (state, accounts) = counting_state();
    let err = signup(State(state), CookieJar::new(), signup_req("a@b.com", "12345", "12345"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.message(), "Password must be at least 6 characters");
    assert_eq!(accounts.calls(), 0);
}

#[tokio::test]
async fn mismatched_confirmation_never_reaches_provider() {
    let (state, accounts) = counting_state();
    let err = signup(State(state), CookieJar::new(), signup_req("a@b.com", "secret1", "secret2"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Passwords do not match");
    assert_eq!(accounts.calls(), 0);
}

#[tokio::test]
async fn valid_signup_reaches_provider_once() {
    let (state, accounts) = counting_state();
    signup(State(state), CookieJar::new(), signup_req("a@b.com", "secret1", "secret1"))
        .await
        .unwrap();
    assert_eq!(accounts.calls(), 1);
}

// =============================================================================
// login / logout
// =============================================================================

#[tokio::test]
async fn login_with_wrong_password_is_generic_401() {
    let state = test_app_state();
    signup(State(state.clone()), CookieJar::new(), signup_req("a@b.com", "secret1", "secret1"))
        .await
        .unwrap();
    let err = login(State(state), CookieJar::new(), login_req("a@b.com", "wrong12"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(err.message(), SIGN_IN_FAILED);
}

#[tokio::test]
async fn login_unknown_email_has_same_message() {
    let state = test_app_state();
    let err = login(State(state), CookieJar::new(), login_req("ghost@b.com", "secret1"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), SIGN_IN_FAILED);
}

#[tokio::test]
async fn logout_deletes_session_and_clears_cookie() {
    let state = test_app_state();
    let (_, jar, _) = signup(State(state.clone()), CookieJar::new(), signup_req("a@b.com", "secret1", "secret1"))
        .await
        .unwrap();
    let token = token_of(&jar);
    let auth = extract(&state, Some(&format!("{COOKIE_NAME}={token}"))).await.unwrap();

    let (cleared, status) = logout(State(state.clone()), auth).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(token_of(&cleared), "");
    assert_eq!(state.sessions.validate(&token).await, None);
}

// =============================================================================
// reset_password
// =============================================================================

#[tokio::test]
async fn reset_for_known_email_succeeds() {
    let state = test_app_state();
    signup(State(state.clone()), CookieJar::new(), signup_req("a@b.com", "secret1", "secret1"))
        .await
        .unwrap();
    let status = reset_password(State(state), Json(ResetPasswordRequest { email: "a@b.com".into() }))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn reset_for_unknown_email_is_generic_400() {
    let state = test_app_state();
    let err = reset_password(State(state), Json(ResetPasswordRequest { email: "nobody@b.com".into() }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.message(), RESET_FAILED);
}

// =============================================================================
// AuthUser extractor
// =============================================================================

#[tokio::test]
async fn extractor_rejects_missing_cookie() {
    let state = test_app_state();
    let err = extract(&state, None).await.err().unwrap();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn extractor_rejects_unknown_token() {
    let state = test_app_state();
    assert!(extract(&state, Some("session_token=bogus")).await.is_err());
}

#[tokio::test]
async fn extractor_accepts_live_session() {
    let state = test_app_state();
    let account = Account { id: "u1".into(), email: "a@b.com".into() };
    let token = state.sessions.create(account.clone()).await;
    let auth = extract(&state, Some(&format!("theme=dark; {COOKIE_NAME}={token}"))).await.unwrap();
    assert_eq!(auth.account, account);
    let Json(me) = me(auth).await;
    assert_eq!(me.email, "a@b.com");
}

#[tokio::test]
async fn session_account_reads_cookie_jar() {
    let state = test_app_state();
    let account = Account { id: "u1".into(), email: "a@b.com".into() };
    let token = state.sessions.create(account.clone()).await;
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, token));
    assert_eq!(session_account(&state, &jar).await, Some(account));
    assert_eq!(session_account(&state, &CookieJar::new()).await, None);
}
