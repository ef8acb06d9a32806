//! Panel persistence on top of the realtime store.
//!
//! Single-panel writes replace `panels/<key>`; multi-panel writes go through
//! one atomic `update` of the `panels` node so a preset or sync never lands
//! half-applied.

use panels::{PANELS_PATH, Panel, PanelCollection, PanelKey, PanelWrites};
use serde_json::{Map, Value};

use super::store::{RealtimeStore, StoreError, Subscription};

/// Current raw value of the panels subtree.
pub async fn snapshot(store: &dyn RealtimeStore) -> Result<Value, StoreError> {
    store.get(PANELS_PATH).await
}

/// Write one full panel object.
pub async fn write_panel(store: &dyn RealtimeStore, key: PanelKey, panel: Panel) -> Result<(), StoreError> {
    store
        .set(&key.path(PANELS_PATH), panel.to_value())
        .await
}

/// Write several panels in one atomic multi-path update.
pub async fn write_panels(store: &dyn RealtimeStore, writes: &PanelWrites) -> Result<(), StoreError> {
    if writes.is_empty() {
        return Ok(());
    }
    let children: Map<String, Value> = writes
        .iter()
        .map(|(key, panel)| (key.as_str().to_owned(), panel.to_value()))
        .collect();
    store.update(PANELS_PATH, children).await
}

/// Fill every missing or malformed panel with the default value.
///
/// Returns the keys that were written.
pub async fn seed_defaults(store: &dyn RealtimeStore) -> Result<Vec<PanelKey>, StoreError> {
    let current = PanelCollection::from_snapshot(&snapshot(store).await?);
    let missing: PanelWrites = PanelKey::ALL
        .into_iter()
        .filter(|key| current.get(*key).is_none())
        .map(|key| (key, Panel::default()))
        .collect();
    write_panels(store, &missing).await?;
    Ok(missing.into_keys().collect())
}

/// Follow the panels subtree.
pub async fn subscribe(store: &dyn RealtimeStore) -> Result<Subscription, StoreError> {
    store.subscribe(PANELS_PATH).await
}

#[cfg(test)]
#[path = "panels_test.rs"]
mod tests;
