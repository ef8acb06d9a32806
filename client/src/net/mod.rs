//! Networking modules for the REST API and the panel stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles auth and panel-write calls; `panel_stream` keeps the
//! dashboard's panel view live over a websocket.

pub mod api;
pub mod panel_stream;
