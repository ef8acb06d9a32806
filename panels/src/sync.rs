//! Panel state synchronizer.
//!
//! ARCHITECTURE
//! ============
//! `PanelSync` is the dashboard's local view of the panels. Every mutation is
//! applied optimistically and returns a `PendingWrite` describing the store
//! write the caller must issue. When the write finishes the caller hands the
//! result back through [`PanelSync::settle`]; failures revert the optimistic
//! change.
//!
//! RECONCILIATION
//! ==============
//! Remote snapshots always replace the local collection (last writer wins).
//! A failed write only reverts keys still holding the value it wrote, so a
//! newer remote snapshot or a newer local edit is never clobbered by a stale
//! rollback.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use serde_json::Value;

use crate::panel::{Panel, PanelCollection, PanelKey, PanelUpdate, PanelWrites};
use crate::preset::Preset;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("{0} has not loaded yet")]
    PanelLoading(PanelKey),
}

/// An optimistic change awaiting its store result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingWrite {
    /// Identifier passed back to [`PanelSync::settle`].
    pub id: u64,
    /// Panels to write to the store.
    pub writes: PanelWrites,
    previous: Vec<(PanelKey, Option<Panel>)>,
}

impl PendingWrite {
    /// `true` when the write covers more than one panel.
    #[must_use]
    pub fn is_bulk(&self) -> bool {
        self.writes.len() > 1
    }
}

#[derive(Clone, Debug, Default)]
pub struct PanelSync {
    panels: PanelCollection,
    pending: Vec<PendingWrite>,
    next_id: u64,
}

impl PanelSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn panels(&self) -> &PanelCollection {
        &self.panels
    }

    #[must_use]
    pub fn panel(&self, key: PanelKey) -> Option<&Panel> {
        self.panels.get(key)
    }

    /// Number of writes still waiting for a result.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Replace the whole local collection with a remote snapshot.
    pub fn apply_remote(&mut self, snapshot: &Value) {
        self.panels = PanelCollection::from_snapshot(snapshot);
    }

    /// Change one field of one panel.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::PanelLoading`] if the panel has no value yet.
    pub fn update_field(&mut self, key: PanelKey, update: PanelUpdate) -> Result<PendingWrite, SyncError> {
        let current = *self.panels.get(key).ok_or(SyncError::PanelLoading(key))?;
        let merged = current.with(update);
        Ok(self.stage(PanelWrites::from([(key, merged)])))
    }

    /// Write a preset template to every panel.
    pub fn apply_preset(&mut self, preset: Preset) -> PendingWrite {
        self.fill(preset.template())
    }

    /// Copy one panel's value to every panel, itself included.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::PanelLoading`] if the source panel has no value yet.
    pub fn sync_all_to(&mut self, source: PanelKey) -> Result<PendingWrite, SyncError> {
        let value = *self.panels.get(source).ok_or(SyncError::PanelLoading(source))?;
        Ok(self.fill(value))
    }

    /// Record the store result of a pending write.
    ///
    /// Unknown ids are ignored.
    pub fn settle<E>(&mut self, id: u64, result: Result<(), E>) {
        let Some(index) = self.pending.iter().position(|p| p.id == id) else {
            return;
        };
        let write = self.pending.remove(index);
        if result.is_ok() {
            return;
        }

        for (key, previous) in write.previous {
            let Some(written) = write.writes.get(&key) else {
                continue;
            };
            if self.panels.get(key) == Some(written) {
                self.panels.restore(key, previous);
            }
            // A later write captured the failed value as its baseline.
            for later in &mut self.pending {
                for (later_key, later_prev) in &mut later.previous {
                    if *later_key == key && later_prev.as_ref() == Some(written) {
                        *later_prev = previous;
                    }
                }
            }
        }
    }

    fn fill(&mut self, panel: Panel) -> PendingWrite {
        self.stage(PanelKey::ALL.into_iter().map(|k| (k, panel)).collect())
    }

    fn stage(&mut self, writes: PanelWrites) -> PendingWrite {
        let previous = writes
            .keys()
            .map(|k| (*k, self.panels.get(*k).copied()))
            .collect();
        for (key, panel) in &writes {
            self.panels.set(*key, *panel);
        }
        self.next_id += 1;
        let pending = PendingWrite { id: self.next_id, writes, previous };
        self.pending.push(pending.clone());
        pending
    }
}
