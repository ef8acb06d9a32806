//! WebSocket panel stream for the dashboard.
//!
//! The stream is opened when the dashboard mounts and closed when it
//! unmounts. While open it reconnects with exponential backoff; every
//! snapshot frame replaces the local panel view.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.

#[cfg(test)]
#[path = "panel_stream_test.rs"]
mod panel_stream_test;

use panels::PanelEvent;
use serde_json::Value;

pub const INITIAL_BACKOFF_MS: u32 = 1000;
pub const MAX_BACKOFF_MS: u32 = 10_000;

/// Stream URL for a page at `href` served from `host`.
#[must_use]
pub fn stream_url(href: &str, host: &str) -> String {
    let ws_proto = if href.starts_with("https") { "wss" } else { "ws" };
    format!("{ws_proto}://{host}/api/panels/stream")
}

#[must_use]
pub fn next_backoff(current_ms: u32) -> u32 {
    current_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Panels subtree carried by a text frame, if it is a snapshot event.
#[must_use]
pub fn parse_snapshot(text: &str) -> Option<Value> {
    match serde_json::from_str::<PanelEvent>(text).ok()? {
        PanelEvent::Snapshot { panels } => Some(panels),
    }
}

/// Open the panel stream for as long as the current reactive owner lives.
#[cfg(feature = "hydrate")]
pub fn open_panel_stream(panels: leptos::prelude::RwSignal<crate::state::panels::PanelsState>) {
    use std::sync::{Arc, Mutex};

    use futures::channel::oneshot;
    use futures::future::{Either, select};

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let stop = Arc::new(Mutex::new(Some(stop_tx)));

    leptos::task::spawn_local(async move {
        let run = Box::pin(stream_loop(panels));
        if let Either::Left(_) = select(stop_rx, run).await {
            log::debug!("panel stream closed");
        }
    });

    leptos::prelude::on_cleanup(move || {
        if let Some(tx) = stop.lock().ok().and_then(|mut s| s.take()) {
            let _ = tx.send(());
        }
    });
}

#[cfg(feature = "hydrate")]
async fn stream_loop(panels: leptos::prelude::RwSignal<crate::state::panels::PanelsState>) {
    use leptos::prelude::Update;

    let mut backoff_ms = INITIAL_BACKOFF_MS;
    loop {
        let location = web_sys::window().map(|w| w.location());
        let href = location
            .as_ref()
            .and_then(|l| l.href().ok())
            .unwrap_or_default();
        let host = location
            .as_ref()
            .and_then(|l| l.host().ok())
            .unwrap_or_else(|| "localhost:3000".to_owned());

        match connect_and_run(&stream_url(&href, &host), panels, &mut backoff_ms).await {
            Ok(()) => log::info!("panel stream disconnected"),
            Err(e) => log::warn!("panel stream error: {e}"),
        }
        panels.update(crate::state::panels::PanelsState::stream_lost);

        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = next_backoff(backoff_ms);
    }
}

#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    panels: leptos::prelude::RwSignal<crate::state::panels::PanelsState>,
    backoff_ms: &mut u32,
) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;
    use leptos::prelude::Update;

    let mut ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let Some(snapshot) = parse_snapshot(&text) else {
                    log::warn!("panel stream: unexpected frame");
                    continue;
                };
                *backoff_ms = INITIAL_BACKOFF_MS;
                panels.update(|s| s.apply_snapshot(&snapshot));
            }
            Ok(Message::Bytes(_)) => {}
            Err(e) => return Err(e.to_string()),
        }
    }
    Ok(())
}
