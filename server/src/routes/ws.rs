//! WebSocket panel stream.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade requires a live session cookie.
//! 2. Subscribe to the panels subtree; the store sends the current value
//!    first, so the browser leaves its loading state on the first frame.
//! 3. Each store snapshot is forwarded as `{"type":"snapshot",...}`.
//! 4. Close from either side drops the subscription, which unsubscribes.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use panels::{Account, PanelEvent};
use serde_json::Value;
use tracing::{info, warn};

use super::auth::AuthUser;
use crate::services::panels as panel_svc;
use crate::state::AppState;

/// `GET /api/panels/stream`
pub async fn panel_stream(State(state): State<AppState>, auth: AuthUser, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_stream(socket, state, auth.account))
}

pub(crate) fn snapshot_text(panels: Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PanelEvent::Snapshot { panels })
}

async fn run_stream(mut socket: WebSocket, state: AppState, account: Account) {
    let mut subscription = match panel_svc::subscribe(state.store.as_ref()).await {
        Ok(sub) => sub,
        Err(e) => {
            tracing::error!(error = %e, account_id = %account.id, "ws: panel subscribe failed");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };
    info!(account_id = %account.id, "ws: panel stream opened");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            snapshot = subscription.next() => {
                let Some(snapshot) = snapshot else {
                    warn!(account_id = %account.id, "ws: panel feed ended");
                    break;
                };
                let text = match snapshot_text(snapshot) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "ws: snapshot encode failed");
                        continue;
                    }
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(subscription);
    info!(account_id = %account.id, "ws: panel stream closed");
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
