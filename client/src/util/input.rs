//! Form and slider input parsing for the dashboard and auth pages.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use panels::PanelUpdate;
use panels::panel::MAX_BRIGHTNESS;
use serde_json::Value;

/// Slider-backed panel fields, in display order.
pub const SLIDER_FIELDS: [&str; 4] = ["red", "green", "blue", "brightness"];

#[must_use]
pub fn slider_max(field: &str) -> u8 {
    if field == "brightness" { MAX_BRIGHTNESS } else { u8::MAX }
}

/// Update for a slider's raw `input` value, `None` if it is not a valid level.
#[must_use]
pub fn slider_update(field: &str, raw: &str) -> Option<PanelUpdate> {
    let level = raw.trim().parse::<u64>().ok()?;
    PanelUpdate::parse(field, &Value::from(level)).ok()
}

/// Email as submitted: surrounding whitespace removed.
#[must_use]
pub fn normalize_email_input(raw: &str) -> String {
    raw.trim().to_owned()
}
