use std::sync::Arc;

use super::*;
use crate::services::accounts::MemoryAccounts;
use crate::state::test_helpers::{FailingStore, test_app_state, test_app_state_with};
use panels::{PanelCollection, Preset};
use serde_json::json;

fn auth() -> AuthUser {
    AuthUser {
        account: panels::Account { id: "u1".into(), email: "a@b.com".into() },
        token: "t".into(),
    }
}

async fn stored(state: &AppState) -> PanelCollection {
    let Json(value) = list_panels(State(state.clone()), auth()).await.unwrap();
    PanelCollection::from_snapshot(&value)
}

#[tokio::test]
async fn empty_store_lists_null() {
    let state = test_app_state();
    let Json(value) = list_panels(State(state), auth()).await.unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn put_panel_writes_one_key() {
    let state = test_app_state();
    let body = json!({"power": true, "red": 10, "green": 20, "blue": 30, "brightness": 40});
    let status = put_panel(State(state.clone()), auth(), Path("panel2".into()), Json(body))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let panels = stored(&state).await;
    assert_eq!(
        panels.get(PanelKey::Panel2),
        Some(&Panel { power: true, red: 10, green: 20, blue: 30, brightness: 40 })
    );
    assert_eq!(panels.get(PanelKey::Panel1), None);
}

#[tokio::test]
async fn put_unknown_key_is_400() {
    let state = test_app_state();
    let body = Panel::default().to_value();
    let err = put_panel(State(state), auth(), Path("panel9".into()), Json(body))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_out_of_range_brightness_is_400() {
    let state = test_app_state();
    let body = json!({"power": true, "red": 0, "green": 0, "blue": 0, "brightness": 101});
    let err = put_panel(State(state), auth(), Path("panel1".into()), Json(body))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_missing_field_is_400() {
    let state = test_app_state();
    let body = json!({"power": true, "red": 0});
    let err = put_panel(State(state), auth(), Path("panel1".into()), Json(body))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_writes_all_panels() {
    let state = test_app_state();
    let party = Preset::Party.template();
    let body: Value = PanelKey::ALL
        .into_iter()
        .map(|k| (k.as_str().to_owned(), party.to_value()))
        .collect::<serde_json::Map<_, _>>()
        .into();
    patch_panels(State(state.clone()), auth(), Json(body))
        .await
        .unwrap();
    assert_eq!(stored(&state).await, PanelCollection::uniform(party));
}

#[tokio::test]
async fn patch_with_unknown_key_writes_nothing() {
    let state = test_app_state();
    let body = json!({
        "panel1": Panel::default().to_value(),
        "lamp": Panel::default().to_value(),
    });
    let err = patch_panels(State(state.clone()), auth(), Json(body))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored(&state).await, PanelCollection::default());
}

#[tokio::test]
async fn empty_patch_is_400() {
    let state = test_app_state();
    let err = patch_panels(State(state), auth(), Json(json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_maps_to_502() {
    let state = test_app_state_with(Arc::new(MemoryAccounts::new()), Arc::new(FailingStore));
    let err = put_panel(State(state.clone()), auth(), Path("panel1".into()), Json(Panel::default().to_value()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(err.message(), crate::routes::error::STORE_FAILED);

    let err = list_panels(State(state), auth()).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}
