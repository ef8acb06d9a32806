//! Panel record, panel keys, and the collection decoded from store snapshots.
//!
//! DESIGN
//! ======
//! A panel is only usable once every attribute is present and in range.
//! Snapshot decoding is therefore lenient per child: a malformed or missing
//! child leaves that key "loading" instead of failing the whole snapshot.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest accepted brightness value.
pub const MAX_BRIGHTNESS: u8 = 100;

/// Errors produced while building or parsing panel values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("unknown panel key: {0}")]
    UnknownKey(String),
    #[error("unknown panel field: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("brightness {0} exceeds {MAX_BRIGHTNESS}")]
    BrightnessOutOfRange(u16),
}

// =============================================================================
// PANEL KEY
// =============================================================================

/// Stable identifier of one of the four panels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PanelKey {
    #[default]
    Panel1,
    Panel2,
    Panel3,
    Panel4,
}

impl PanelKey {
    /// All panel keys in display order.
    pub const ALL: [Self; 4] = [Self::Panel1, Self::Panel2, Self::Panel3, Self::Panel4];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Panel1 => "panel1",
            Self::Panel2 => "panel2",
            Self::Panel3 => "panel3",
            Self::Panel4 => "panel4",
        }
    }

    /// One-based panel number shown in the UI ("Panel 3").
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Panel1 => 1,
            Self::Panel2 => 2,
            Self::Panel3 => 3,
            Self::Panel4 => 4,
        }
    }

    /// Store path of this panel below `root`.
    #[must_use]
    pub fn path(self, root: &str) -> String {
        format!("{}/{}", root.trim_end_matches('/'), self.as_str())
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelKey {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| PanelError::UnknownKey(s.to_owned()))
    }
}

impl TryFrom<String> for PanelKey {
    type Error = PanelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PanelKey> for String {
    fn from(key: PanelKey) -> Self {
        key.as_str().to_owned()
    }
}

// =============================================================================
// PANEL
// =============================================================================

/// Full state of one panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPanel")]
pub struct Panel {
    pub power: bool,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub brightness: u8,
}

/// Unvalidated wire shape; all five attributes are required.
#[derive(Deserialize)]
struct RawPanel {
    power: bool,
    red: u8,
    green: u8,
    blue: u8,
    brightness: u16,
}

impl TryFrom<RawPanel> for Panel {
    type Error = PanelError;

    fn try_from(raw: RawPanel) -> Result<Self, Self::Error> {
        let brightness = u8::try_from(raw.brightness)
            .ok()
            .filter(|b| *b <= MAX_BRIGHTNESS)
            .ok_or(PanelError::BrightnessOutOfRange(raw.brightness))?;
        Ok(Self { power: raw.power, red: raw.red, green: raw.green, blue: raw.blue, brightness })
    }
}

impl Default for Panel {
    /// Switched-off black panel at half brightness.
    fn default() -> Self {
        Self { power: false, red: 0, green: 0, blue: 0, brightness: 50 }
    }
}

impl Panel {
    /// Return a copy with one field replaced.
    #[must_use]
    pub fn with(self, update: PanelUpdate) -> Self {
        let mut next = self;
        match update {
            PanelUpdate::Power(v) => next.power = v,
            PanelUpdate::Red(v) => next.red = v,
            PanelUpdate::Green(v) => next.green = v,
            PanelUpdate::Blue(v) => next.blue = v,
            PanelUpdate::Brightness(v) => next.brightness = v.min(MAX_BRIGHTNESS),
        }
        next
    }

    /// CSS `rgb()` color for swatches.
    #[must_use]
    pub fn css_color(&self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }

    /// Serialize to the flat store object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "power": self.power,
            "red": self.red,
            "green": self.green,
            "blue": self.blue,
            "brightness": self.brightness,
        })
    }
}

// =============================================================================
// PANEL UPDATE
// =============================================================================

/// A change to exactly one panel attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelUpdate {
    Power(bool),
    Red(u8),
    Green(u8),
    Blue(u8),
    Brightness(u8),
}

impl PanelUpdate {
    /// Build an update from a field name and a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown field names, values of the wrong type, and
    /// values outside the field's range.
    pub fn parse(field: &str, value: &Value) -> Result<Self, PanelError> {
        let invalid = |field: &'static str| PanelError::InvalidValue { field, value: value.to_string() };
        let channel = |field: &'static str| {
            value
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(|| invalid(field))
        };
        match field {
            "power" => value.as_bool().map(Self::Power).ok_or_else(|| invalid("power")),
            "red" => channel("red").map(Self::Red),
            "green" => channel("green").map(Self::Green),
            "blue" => channel("blue").map(Self::Blue),
            "brightness" => {
                let v = channel("brightness")?;
                if v > MAX_BRIGHTNESS {
                    return Err(PanelError::BrightnessOutOfRange(u16::from(v)));
                }
                Ok(Self::Brightness(v))
            }
            other => Err(PanelError::UnknownField(other.to_owned())),
        }
    }

    /// Field name as stored.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Power(_) => "power",
            Self::Red(_) => "red",
            Self::Green(_) => "green",
            Self::Blue(_) => "blue",
            Self::Brightness(_) => "brightness",
        }
    }
}

// =============================================================================
// COLLECTION
// =============================================================================

/// Panels to write, keyed by panel.
pub type PanelWrites = BTreeMap<PanelKey, Panel>;

/// Local view of all panels. A key without an entry is still loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelCollection {
    panels: BTreeMap<PanelKey, Panel>,
}

impl PanelCollection {
    /// Collection with every key set to `panel`.
    #[must_use]
    pub fn uniform(panel: Panel) -> Self {
        Self { panels: PanelKey::ALL.into_iter().map(|k| (k, panel)).collect() }
    }

    /// Decode a store snapshot of the panels subtree.
    ///
    /// `null` yields an all-loading collection. Children that are missing,
    /// incomplete, or out of range stay loading; unknown keys are ignored.
    #[must_use]
    pub fn from_snapshot(snapshot: &Value) -> Self {
        let Some(children) = snapshot.as_object() else {
            return Self::default();
        };
        let panels = children
            .iter()
            .filter_map(|(key, child)| {
                let key = key.parse::<PanelKey>().ok()?;
                let panel = serde_json::from_value::<Panel>(child.clone()).ok()?;
                Some((key, panel))
            })
            .collect();
        Self { panels }
    }

    #[must_use]
    pub fn get(&self, key: PanelKey) -> Option<&Panel> {
        self.panels.get(&key)
    }

    /// `true` once every key holds a valid panel.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        PanelKey::ALL.iter().all(|k| self.panels.contains_key(k))
    }

    pub fn set(&mut self, key: PanelKey, panel: Panel) {
        self.panels.insert(key, panel);
    }

    pub(crate) fn restore(&mut self, key: PanelKey, panel: Option<Panel>) {
        match panel {
            Some(p) => {
                self.panels.insert(key, p);
            }
            None => {
                self.panels.remove(&key);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PanelKey, &Panel)> {
        self.panels.iter().map(|(k, p)| (*k, p))
    }

    /// Encode as the store subtree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let map = self
            .panels
            .iter()
            .map(|(k, p)| (k.as_str().to_owned(), p.to_value()))
            .collect::<serde_json::Map<_, _>>();
        Value::Object(map)
    }
}
