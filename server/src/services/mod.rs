//! Services behind the HTTP and websocket routes.
//!
//! ARCHITECTURE
//! ============
//! The two external collaborators are traits: [`accounts::AccountProvider`]
//! for identity and [`store::RealtimeStore`] for panel data. Each has an
//! in-process implementation and a Firebase client. Route handlers stay
//! focused on protocol translation and cookie plumbing.

pub mod accounts;
pub mod identity;
pub mod panels;
pub mod rtdb;
pub mod session;
pub mod store;
