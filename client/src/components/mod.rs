pub mod alert;
pub mod auth_layout;
pub mod panel_card;
pub mod preset_bar;
pub mod sync_bar;
