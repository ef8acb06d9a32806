use super::*;
use crate::services::store::MemoryStore;
use panels::{PanelSync, PanelUpdate, Preset};
use serde_json::json;

fn lit(power: bool, red: u8, green: u8, blue: u8, brightness: u8) -> Panel {
    Panel { power, red, green, blue, brightness }
}

async fn collection(store: &MemoryStore) -> PanelCollection {
    PanelCollection::from_snapshot(&snapshot(store).await.unwrap())
}

#[tokio::test]
async fn seed_defaults_fills_empty_store() {
    let store = MemoryStore::new();
    let seeded = seed_defaults(&store).await.unwrap();
    assert_eq!(seeded, PanelKey::ALL.to_vec());
    assert_eq!(collection(&store).await, PanelCollection::uniform(Panel::default()));
}

#[tokio::test]
async fn seed_defaults_keeps_existing_panels() {
    let store = MemoryStore::new();
    write_panel(&store, PanelKey::Panel2, lit(true, 1, 2, 3, 4))
        .await
        .unwrap();
    let seeded = seed_defaults(&store).await.unwrap();
    assert_eq!(seeded, vec![PanelKey::Panel1, PanelKey::Panel3, PanelKey::Panel4]);
    assert_eq!(collection(&store).await.get(PanelKey::Panel2), Some(&lit(true, 1, 2, 3, 4)));
}

#[tokio::test]
async fn seed_defaults_on_full_store_writes_nothing() {
    let store = MemoryStore::new();
    seed_defaults(&store).await.unwrap();
    assert!(seed_defaults(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn write_panel_uses_flat_layout() {
    let store = MemoryStore::new();
    write_panel(&store, PanelKey::Panel1, lit(true, 10, 20, 30, 40))
        .await
        .unwrap();
    assert_eq!(
        store.get("panels/panel1").await.unwrap(),
        json!({"power": true, "red": 10, "green": 20, "blue": 30, "brightness": 40})
    );
}

#[tokio::test]
async fn warm_preset_reaches_store() {
    let store = MemoryStore::new();
    seed_defaults(&store).await.unwrap();

    let mut sync = PanelSync::new();
    sync.apply_remote(&snapshot(&store).await.unwrap());
    let pending = sync.apply_preset(Preset::Warm);
    write_panels(&store, &pending.writes).await.unwrap();

    let warm = lit(true, 255, 244, 229, 80);
    assert_eq!(collection(&store).await, PanelCollection::uniform(warm));
    assert_eq!(sync.panels(), &PanelCollection::uniform(warm));
}

#[tokio::test]
async fn sync_all_to_panel2_reaches_store() {
    let store = MemoryStore::new();
    seed_defaults(&store).await.unwrap();
    let source = lit(true, 10, 20, 30, 40);
    write_panel(&store, PanelKey::Panel2, source).await.unwrap();

    let mut sync = PanelSync::new();
    sync.apply_remote(&snapshot(&store).await.unwrap());
    let pending = sync.sync_all_to(PanelKey::Panel2).unwrap();
    write_panels(&store, &pending.writes).await.unwrap();

    assert_eq!(collection(&store).await, PanelCollection::uniform(source));
}

#[tokio::test]
async fn update_field_touches_only_one_panel_in_store() {
    let store = MemoryStore::new();
    seed_defaults(&store).await.unwrap();
    write_panel(&store, PanelKey::Panel3, lit(true, 5, 6, 7, 8))
        .await
        .unwrap();

    let mut sync = PanelSync::new();
    sync.apply_remote(&snapshot(&store).await.unwrap());
    let pending = sync
        .update_field(PanelKey::Panel3, PanelUpdate::Brightness(75))
        .unwrap();
    let (key, panel) = pending.writes.iter().next().unwrap();
    write_panel(&store, *key, *panel).await.unwrap();

    let stored = collection(&store).await;
    assert_eq!(stored.get(PanelKey::Panel3), Some(&lit(true, 5, 6, 7, 75)));
    assert_eq!(stored.get(PanelKey::Panel1), Some(&Panel::default()));
}

#[tokio::test]
async fn bulk_write_is_one_snapshot_for_subscribers() {
    let store = MemoryStore::new();
    seed_defaults(&store).await.unwrap();
    let mut sub = subscribe(&store).await.unwrap();
    sub.next().await.unwrap();

    let writes: PanelWrites = PanelKey::ALL
        .into_iter()
        .map(|k| (k, Preset::Party.template()))
        .collect();
    write_panels(&store, &writes).await.unwrap();

    let snapshot = sub.next().await.unwrap();
    assert_eq!(
        PanelCollection::from_snapshot(&snapshot),
        PanelCollection::uniform(Preset::Party.template())
    );
}

#[tokio::test]
async fn empty_write_is_noop() {
    let store = MemoryStore::new();
    write_panels(&store, &PanelWrites::new()).await.unwrap();
    assert_eq!(snapshot(&store).await.unwrap(), Value::Null);
}
