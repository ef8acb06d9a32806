//! Firebase Realtime Database REST client.
//!
//! DESIGN
//! ======
//! Reads and writes map onto `GET`/`PUT`/`PATCH <db>/<path>.json`. A
//! subscription opens the REST streaming endpoint (`text/event-stream`) in a
//! background task, folds `put`/`patch` events into a local mirror of the
//! path, and forwards the mirror after every change.
//!
//! LIFECYCLE
//! =========
//! The stream task reconnects with exponential backoff when the stream ends
//! or fails. It stops when the subscriber drops its [`Subscription`] or the
//! database sends `cancel` / `auth_revoked`.

use std::time::Duration;

use futures::StreamExt;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::store::{RealtimeStore, StoreError, Subscription, segments, write_at};
use crate::config::{FirebaseConfig, HttpTimeouts};

const INITIAL_BACKOFF_MS: u64 = 1000;
const MAX_BACKOFF_MS: u64 = 10_000;

#[derive(Clone)]
pub struct FirebaseStore {
    http: reqwest::Client,
    stream_http: reqwest::Client,
    base_url: String,
    auth: Option<String>,
}

impl FirebaseStore {
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be built.
    pub fn new(config: &FirebaseConfig, timeouts: HttpTimeouts) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;
        // Streams stay open indefinitely; only the connect phase is bounded.
        let stream_http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::Request(e.to_string()))?;
        Ok(Self {
            http,
            stream_http,
            base_url: config.database_url.trim_end_matches('/').to_owned(),
            auth: config.database_auth.clone(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, segments(path).join("/"))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(auth) => request.query(&[("auth", auth.as_str())]),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, StoreError> {
        let response = self
            .with_auth(request)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(StoreError::Response { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl RealtimeStore for FirebaseStore {
    async fn get(&self, path: &str) -> Result<Value, StoreError> {
        let text = self.send(self.http.get(self.url(path))).await?;
        serde_json::from_str(&text).map_err(|e| StoreError::Parse(e.to_string()))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let request = self
            .http
            .put(self.url(path))
            .query(&[("print", "silent")])
            .json(&value);
        self.send(request).await.map(|_| ())
    }

    async fn update(&self, path: &str, children: Map<String, Value>) -> Result<(), StoreError> {
        let request = self
            .http
            .patch(self.url(path))
            .query(&[("print", "silent")])
            .json(&children);
        self.send(request).await.map(|_| ())
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let (tx, subscription) = Subscription::channel();
        let store = self.clone();
        let path = path.to_owned();
        tokio::spawn(async move { store.run_stream(path, tx).await });
        Ok(subscription)
    }
}

// =============================================================================
// STREAMING
// =============================================================================

/// Why a single stream connection ended.
enum StreamEnd {
    /// Subscriber went away.
    Closed,
    /// Database cancelled the listener; do not reconnect.
    Cancelled(&'static str),
    /// Connection dropped or failed; reconnect.
    Dropped(String),
}

impl FirebaseStore {
    async fn run_stream(self, path: String, tx: watch::Sender<Value>) {
        let mut backoff_ms = INITIAL_BACKOFF_MS;
        loop {
            match self.stream_once(&path, &tx, &mut backoff_ms).await {
                StreamEnd::Closed => {
                    debug!(%path, "rtdb stream: subscriber closed");
                    return;
                }
                StreamEnd::Cancelled(reason) => {
                    warn!(%path, reason, "rtdb stream cancelled by server");
                    return;
                }
                StreamEnd::Dropped(err) => {
                    warn!(%path, error = %err, backoff_ms, "rtdb stream dropped; reconnecting");
                }
            }
            tokio::select! {
                () = tokio::time::sleep(Duration::from_millis(backoff_ms)) => {}
                () = tx.closed() => return,
            }
            backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
        }
    }

    async fn stream_once(&self, path: &str, tx: &watch::Sender<Value>, backoff_ms: &mut u64) -> StreamEnd {
        let request = self
            .stream_http
            .get(self.url(path))
            .header(reqwest::header::ACCEPT, "text/event-stream");
        let response = match self.with_auth(request).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => return StreamEnd::Dropped(format!("status {}", r.status())),
            Err(e) => return StreamEnd::Dropped(e.to_string()),
        };
        info!(%path, "rtdb stream: connected");

        let mut body = response.bytes_stream();
        let mut parser = SseParser::default();
        let mut mirror = Value::Null;
        let mut last_sent: Option<Value> = None;

        loop {
            let chunk = tokio::select! {
                chunk = body.next() => chunk,
                () = tx.closed() => return StreamEnd::Closed,
            };
            let bytes = match chunk {
                Some(Ok(bytes)) => bytes,
                Some(Err(e)) => return StreamEnd::Dropped(e.to_string()),
                None => return StreamEnd::Dropped("stream ended".to_owned()),
            };

            for event in parser.feed(&bytes) {
                match apply_event(&mut mirror, &event) {
                    Ok(EventEffect::Changed) => {
                        *backoff_ms = INITIAL_BACKOFF_MS;
                        if last_sent.as_ref() == Some(&mirror) {
                            continue;
                        }
                        if tx.send(mirror.clone()).is_err() {
                            return StreamEnd::Closed;
                        }
                        last_sent = Some(mirror.clone());
                    }
                    Ok(EventEffect::None) => {}
                    Ok(EventEffect::Cancel(reason)) => return StreamEnd::Cancelled(reason),
                    Err(e) => warn!(%path, error = %e, event = %event.event, "rtdb stream: bad event"),
                }
            }
        }
    }
}

// =============================================================================
// SERVER-SENT EVENTS
// =============================================================================

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

/// Incremental `text/event-stream` parser. Chunks may split lines, and
/// multi-byte characters, anywhere.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    event: String,
    data: Vec<String>,
}

impl SseParser {
    /// Feed a chunk and return every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                if !self.event.is_empty() || !self.data.is_empty() {
                    events.push(SseEvent {
                        event: std::mem::take(&mut self.event),
                        data: std::mem::take(&mut self.data).join("\n"),
                    });
                }
                continue;
            }
            if line.starts_with(':') {
                continue;
            }
            let (field, value) = line.split_once(':').unwrap_or((line, ""));
            let value = value.strip_prefix(' ').unwrap_or(value);
            match field {
                "event" => value.clone_into(&mut self.event),
                "data" => self.data.push(value.to_owned()),
                _ => {}
            }
        }
        events
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum EventEffect {
    Changed,
    None,
    Cancel(&'static str),
}

#[derive(Deserialize)]
struct EventPayload {
    path: String,
    data: Value,
}

/// Fold one streaming event into `mirror`, the value of the subscribed path.
pub(crate) fn apply_event(mirror: &mut Value, event: &SseEvent) -> Result<EventEffect, StoreError> {
    match event.event.as_str() {
        "put" => {
            let payload: EventPayload =
                serde_json::from_str(&event.data).map_err(|e| StoreError::Parse(e.to_string()))?;
            write_at(mirror, &payload.path, payload.data);
            Ok(EventEffect::Changed)
        }
        "patch" => {
            let payload: EventPayload =
                serde_json::from_str(&event.data).map_err(|e| StoreError::Parse(e.to_string()))?;
            let Value::Object(children) = payload.data else {
                return Err(StoreError::Parse("patch data is not an object".to_owned()));
            };
            let base = segments(&payload.path).join("/");
            for (key, value) in children {
                write_at(mirror, &format!("{base}/{key}"), value);
            }
            Ok(EventEffect::Changed)
        }
        "keep-alive" => Ok(EventEffect::None),
        "cancel" => Ok(EventEffect::Cancel("cancel")),
        "auth_revoked" => Ok(EventEffect::Cancel("auth_revoked")),
        _ => Ok(EventEffect::None),
    }
}

#[cfg(test)]
#[path = "rtdb_test.rs"]
mod tests;
