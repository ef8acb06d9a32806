//! Shared lighting-panel model for the `server` and `client` crates.
//!
//! This crate owns everything both sides must agree on: the panel record and
//! its validation rules, the fixed presets, the optimistic synchronizer used
//! by the dashboard, page routing with its session guard, sign-up form
//! validation, and the JSON types exchanged over HTTP and the panel stream.
//! It performs no I/O.

pub mod form;
pub mod panel;
pub mod preset;
pub mod route;
pub mod sync;
pub mod wire;

pub use panel::{Panel, PanelCollection, PanelError, PanelKey, PanelUpdate, PanelWrites};
pub use preset::Preset;
pub use sync::{PanelSync, PendingWrite, SyncError};
pub use wire::{Account, PanelEvent};

/// Store subtree holding one child per panel key.
pub const PANELS_PATH: &str = "panels";
