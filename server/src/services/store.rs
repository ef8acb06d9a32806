//! Realtime data store seam.
//!
//! ARCHITECTURE
//! ============
//! The store is a JSON tree addressed by slash-separated paths. Absence is
//! `null`, as in the hosted database. Writes are either a whole-subtree
//! `set` or an `update` that replaces several children of one node in a
//! single atomic step.
//!
//! SUBSCRIPTIONS
//! =============
//! `subscribe` hands back a [`Subscription`] that yields the current value of
//! the path first and then the latest value after each change. A reader that
//! falls behind skips intermediate values but never misses the newest one.
//! Dropping the subscription unsubscribes; publishers notice the closed
//! channel and stop.

use std::sync::Mutex;

use serde_json::{Map, Value};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),
    #[error("store responded with status {status}: {body}")]
    Response { status: u16, body: String },
    #[error("store response parse failed: {0}")]
    Parse(String),
    #[error("store unavailable")]
    Unavailable,
}

#[async_trait::async_trait]
pub trait RealtimeStore: Send + Sync {
    /// Current value at `path`, `null` when absent.
    async fn get(&self, path: &str) -> Result<Value, StoreError>;

    /// Replace the subtree at `path`. Writing `null` removes it.
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Replace several children of `path` atomically.
    async fn update(&self, path: &str, children: Map<String, Value>) -> Result<(), StoreError>;

    /// Follow the value at `path`.
    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError>;
}

/// Live feed of snapshots for one path.
pub struct Subscription {
    rx: watch::Receiver<Value>,
}

impl Subscription {
    /// Create a subscription and the sender its publisher writes to.
    ///
    /// Nothing is delivered until the publisher sends its first value.
    #[must_use]
    pub fn channel() -> (watch::Sender<Value>, Self) {
        let (tx, rx) = watch::channel(Value::Null);
        (tx, Self { rx })
    }

    /// Latest unseen snapshot, or `None` once the publisher has stopped.
    pub async fn next(&mut self) -> Option<Value> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

// =============================================================================
// PATH HELPERS
// =============================================================================

pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Value at `path` inside `tree`, `null` when absent.
#[must_use]
pub fn value_at(tree: &Value, path: &str) -> Value {
    let mut node = tree;
    for segment in segments(path) {
        match node.get(segment) {
            Some(child) => node = child,
            None => return Value::Null,
        }
    }
    node.clone()
}

/// Write `value` at `path`, creating parents. `null` removes the node and
/// prunes parents left empty.
pub fn write_at(tree: &mut Value, path: &str, value: Value) {
    let parts = segments(path);
    write_parts(tree, &parts, value);
}

fn write_parts(node: &mut Value, parts: &[&str], value: Value) {
    let Some((first, rest)) = parts.split_first() else {
        *node = value;
        return;
    };
    if value.is_null() && !node.is_object() {
        return;
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let Value::Object(map) = node else {
        return;
    };
    if rest.is_empty() {
        if value.is_null() {
            map.remove(*first);
        } else {
            map.insert((*first).to_owned(), value);
        }
    } else {
        let child = map.entry((*first).to_owned()).or_insert(Value::Null);
        write_parts(child, rest, value);
        if child.is_null() || child.as_object().is_some_and(Map::is_empty) {
            map.remove(*first);
        }
    }
    if map.is_empty() {
        *node = Value::Null;
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

struct Subscriber {
    path: String,
    tx: watch::Sender<Value>,
}

#[derive(Default)]
struct MemoryInner {
    tree: Value,
    subscribers: Vec<Subscriber>,
}

/// In-process store used for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock()
            .subscribers
            .iter()
            .filter(|sub| !sub.tx.is_closed())
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn mutate<F: FnOnce(&mut Value)>(&self, apply: F) {
        let mut inner = self.lock();
        apply(&mut inner.tree);
        let MemoryInner { tree, subscribers } = &mut *inner;
        subscribers.retain_mut(|sub| {
            if sub.tx.is_closed() {
                return false;
            }
            let current = value_at(tree, &sub.path);
            sub.tx.send_if_modified(|latest| {
                if *latest == current {
                    return false;
                }
                *latest = current;
                true
            });
            true
        });
    }
}

#[async_trait::async_trait]
impl RealtimeStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Value, StoreError> {
        Ok(value_at(&self.lock().tree, path))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        self.mutate(|tree| write_at(tree, path, value));
        Ok(())
    }

    async fn update(&self, path: &str, children: Map<String, Value>) -> Result<(), StoreError> {
        let base = segments(path).join("/");
        self.mutate(|tree| {
            for (key, value) in children {
                write_at(tree, &format!("{base}/{key}"), value);
            }
        });
        Ok(())
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let (tx, subscription) = Subscription::channel();
        let mut inner = self.lock();
        tx.send_replace(value_at(&inner.tree, path));
        inner.subscribers.push(Subscriber { path: path.to_owned(), tx });
        Ok(subscription)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
