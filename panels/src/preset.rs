//! Named lighting presets applied to every panel at once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::panel::Panel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Warm,
    Cool,
    Reading,
    Party,
}

impl Preset {
    pub const ALL: [Self; 4] = [Self::Warm, Self::Cool, Self::Reading, Self::Party];

    /// Full panel value this preset writes.
    #[must_use]
    pub fn template(self) -> Panel {
        let (red, green, blue, brightness) = match self {
            Self::Warm => (255, 244, 229, 80),
            Self::Cool => (200, 220, 255, 90),
            Self::Reading => (255, 255, 200, 70),
            Self::Party => (180, 0, 255, 100),
        };
        Panel { power: true, red, green, blue, brightness }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Reading => "reading",
            Self::Party => "party",
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Warm => "Warm Light",
            Self::Cool => "Cool Light",
            Self::Reading => "Reading Light",
            Self::Party => "Party Mode",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown preset: {s}"))
    }
}
