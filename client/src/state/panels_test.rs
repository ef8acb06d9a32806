use super::*;
use panels::PanelCollection;

fn loaded() -> PanelsState {
    let mut state = PanelsState::default();
    state.apply_snapshot(&PanelCollection::uniform(Panel::default()).to_value());
    state
}

#[test]
fn default_is_connecting_and_loading() {
    let state = PanelsState::default();
    assert_eq!(state.status, StreamStatus::Connecting);
    assert_eq!(state.sync_source, PanelKey::Panel1);
    assert!(PanelKey::ALL.iter().all(|k| state.panel(*k).is_none()));
}

#[test]
fn snapshot_marks_stream_live() {
    let state = loaded();
    assert_eq!(state.status, StreamStatus::Live);
    assert_eq!(state.panel(PanelKey::Panel4), Some(Panel::default()));
}

#[test]
fn null_snapshot_keeps_panels_loading() {
    let mut state = loaded();
    state.apply_snapshot(&Value::Null);
    assert_eq!(state.panel(PanelKey::Panel1), None);
}

#[test]
fn stream_loss_is_reported() {
    let mut state = loaded();
    state.stream_lost();
    assert_eq!(state.status, StreamStatus::Reconnecting);
}

#[test]
fn update_field_before_load_is_refused() {
    let mut state = PanelsState::default();
    assert_eq!(
        state.update_field(PanelKey::Panel3, PanelUpdate::Red(5)),
        Err(SyncError::PanelLoading(PanelKey::Panel3))
    );
}

#[test]
fn sync_all_uses_selected_source() {
    let mut state = loaded();
    let source = Panel { power: true, red: 10, green: 20, blue: 30, brightness: 40 };
    state.apply_snapshot(
        &serde_json::json!({
            "panel1": Panel::default().to_value(),
            "panel2": source.to_value(),
            "panel3": Panel::default().to_value(),
            "panel4": Panel::default().to_value(),
        }),
    );
    state.sync_source = PanelKey::Panel2;
    let pending = state.sync_all().unwrap();
    assert!(pending.is_bulk());
    assert!(PanelKey::ALL.iter().all(|k| state.panel(*k) == Some(source)));
}

#[test]
fn successful_settle_raises_no_banner() {
    let mut state = loaded();
    let pending = state.apply_preset(Preset::Cool);
    assert_eq!(state.settle(pending.id, Ok(())), None);
    assert_eq!(state.error, None);
    assert_eq!(state.pending_count(), 0);
    assert_eq!(state.panel(PanelKey::Panel1), Some(Preset::Cool.template()));
}

#[test]
fn failed_settle_reverts_and_raises_banner() {
    let mut state = loaded();
    let pending = state
        .update_field(PanelKey::Panel1, PanelUpdate::Power(true))
        .unwrap();
    let seq = state.settle(pending.id, Err("502".to_owned()));
    assert_eq!(seq, Some(1));
    assert_eq!(state.error.as_deref(), Some(WRITE_FAILED));
    assert_eq!(state.panel(PanelKey::Panel1), Some(Panel::default()));
}

#[test]
fn stale_dismiss_keeps_newer_banner() {
    let mut state = loaded();
    let first = state.apply_preset(Preset::Warm);
    let second = state.apply_preset(Preset::Party);
    let first_seq = state.settle(first.id, Err("x".to_owned())).unwrap();
    let second_seq = state.settle(second.id, Err("y".to_owned())).unwrap();

    state.dismiss_error(first_seq);
    assert!(state.error.is_some());
    state.dismiss_error(second_seq);
    assert_eq!(state.error, None);
}
