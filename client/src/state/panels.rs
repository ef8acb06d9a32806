//! Dashboard panel state.
//!
//! DESIGN
//! ======
//! Wraps the shared [`PanelSync`] with the presentation concerns the
//! dashboard needs: stream status, the panel chosen as sync source, and the
//! transient write-failure banner. Every method is synchronous; network
//! effects live in `net` and report back through [`PanelsState::settle`].

#[cfg(test)]
#[path = "panels_test.rs"]
mod panels_test;

use panels::{Panel, PanelKey, PanelSync, PanelUpdate, PendingWrite, Preset, SyncError};
use serde_json::Value;

/// Banner text shown when a store write fails.
pub const WRITE_FAILED: &str = "Failed to save panel changes";

/// Connection status of the panel stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamStatus {
    #[default]
    Connecting,
    Live,
    Reconnecting,
}

#[derive(Clone, Debug, Default)]
pub struct PanelsState {
    sync: PanelSync,
    pub status: StreamStatus,
    /// Panel copied to every other panel by "sync all".
    pub sync_source: PanelKey,
    pub error: Option<String>,
    /// Bumped per banner so a stale dismiss timer leaves a newer one alone.
    pub error_seq: u64,
}

impl PanelsState {
    #[must_use]
    pub fn panel(&self, key: PanelKey) -> Option<Panel> {
        self.sync.panel(key).copied()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.sync.pending_count()
    }

    /// Load a snapshot pushed by the panel stream.
    pub fn apply_snapshot(&mut self, snapshot: &Value) {
        self.sync.apply_remote(snapshot);
        self.status = StreamStatus::Live;
    }

    pub fn stream_lost(&mut self) {
        self.status = StreamStatus::Reconnecting;
    }

    /// # Errors
    ///
    /// Returns [`SyncError::PanelLoading`] while the panel has no value.
    pub fn update_field(&mut self, key: PanelKey, update: PanelUpdate) -> Result<PendingWrite, SyncError> {
        self.sync.update_field(key, update)
    }

    pub fn apply_preset(&mut self, preset: Preset) -> PendingWrite {
        self.sync.apply_preset(preset)
    }

    /// Copy the selected source panel to all panels.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::PanelLoading`] while the source has no value.
    pub fn sync_all(&mut self) -> Result<PendingWrite, SyncError> {
        self.sync.sync_all_to(self.sync_source)
    }

    /// Record a write result; failures revert and raise the banner.
    ///
    /// Returns the banner sequence number when one was raised.
    pub fn settle(&mut self, id: u64, result: Result<(), String>) -> Option<u64> {
        let failed = result.is_err();
        self.sync.settle(id, result);
        if !failed {
            return None;
        }
        self.error_seq += 1;
        self.error = Some(WRITE_FAILED.to_owned());
        Some(self.error_seq)
    }

    /// Clear the banner if it is still the one numbered `seq`.
    pub fn dismiss_error(&mut self, seq: u64) {
        if self.error_seq == seq {
            self.error = None;
        }
    }
}
