use super::*;
use serde_json::json;

#[test]
fn stream_url_follows_page_scheme() {
    assert_eq!(stream_url("https://fixlit.app/", "fixlit.app"), "wss://fixlit.app/api/panels/stream");
    assert_eq!(stream_url("http://localhost:3000/", "localhost:3000"), "ws://localhost:3000/api/panels/stream");
}

#[test]
fn backoff_doubles_up_to_cap() {
    assert_eq!(next_backoff(INITIAL_BACKOFF_MS), 2000);
    assert_eq!(next_backoff(8000), MAX_BACKOFF_MS);
    assert_eq!(next_backoff(MAX_BACKOFF_MS), MAX_BACKOFF_MS);
}

#[test]
fn parse_snapshot_extracts_panels() {
    let text = r#"{"type":"snapshot","panels":{"panel1":{"power":true}}}"#;
    assert_eq!(parse_snapshot(text), Some(json!({"panel1": {"power": true}})));
}

#[test]
fn parse_snapshot_keeps_null() {
    assert_eq!(parse_snapshot(r#"{"type":"snapshot","panels":null}"#), Some(Value::Null));
}

#[test]
fn parse_snapshot_rejects_other_frames() {
    assert_eq!(parse_snapshot("not json"), None);
    assert_eq!(parse_snapshot(r#"{"type":"hello"}"#), None);
}
