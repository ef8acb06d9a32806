//! Application state modules.
//!
//! ARCHITECTURE
//! ============
//! Each state struct is wrapped in an `RwSignal` and provided once at the app
//! root, so pages and components share one explicit session and one panel
//! view instead of reaching for globals.

pub mod auth;
pub mod panels;
