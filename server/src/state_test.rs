use super::*;
use crate::config::{FirebaseConfig, HttpTimeouts};

fn config(backend: BackendKind, firebase: Option<FirebaseConfig>) -> ServerConfig {
    ServerConfig {
        port: 3000,
        cookie_secure: true,
        backend,
        firebase,
        timeouts: HttpTimeouts::default(),
        seed_panels: true,
    }
}

#[tokio::test]
async fn memory_backend_builds_working_state() {
    let state = AppState::from_config(&config(BackendKind::Memory, None)).unwrap();
    assert!(state.cookie_secure);
    let account = state.accounts.sign_up("a@b.com", "secret1").await.unwrap();
    assert_eq!(account.email, "a@b.com");
    assert_eq!(state.store.get("panels").await.unwrap(), serde_json::Value::Null);
}

#[test]
fn firebase_backend_without_settings_fails() {
    let result = AppState::from_config(&config(BackendKind::Firebase, None));
    assert!(matches!(result, Err(StartupError::Config(ConfigError::Missing { .. }))));
}

#[test]
fn firebase_backend_with_settings_builds() {
    let firebase = FirebaseConfig {
        api_key: "key".into(),
        database_url: "https://demo.firebaseio.com".into(),
        database_auth: None,
    };
    assert!(AppState::from_config(&config(BackendKind::Firebase, Some(firebase))).is_ok());
}

#[tokio::test]
async fn clones_share_sessions() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    let token = state
        .sessions
        .create(panels::Account { id: "1".into(), email: "a@b.com".into() })
        .await;
    assert!(clone.sessions.validate(&token).await.is_some());
}
