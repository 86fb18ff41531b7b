//! The fixed category enum a mod belongs to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Equipment slot a content package belongs to.
///
/// The set is fixed; any other value is rejected before a write occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Body,
    Bottoms,
    Bust,
    Eyes,
    Gloves,
    Hair,
    Hat,
    Shoes,
    Socks,
    Top,
    Presets,
}

impl Slot {
    /// All slots, in display order
    pub const ALL: [Slot; 11] = [
        Slot::Body,
        Slot::Bottoms,
        Slot::Bust,
        Slot::Eyes,
        Slot::Gloves,
        Slot::Hair,
        Slot::Hat,
        Slot::Shoes,
        Slot::Socks,
        Slot::Top,
        Slot::Presets,
    ];

    /// Canonical name as stored in the catalog
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Body => "Body",
            Slot::Bottoms => "Bottoms",
            Slot::Bust => "Bust",
            Slot::Eyes => "Eyes",
            Slot::Gloves => "Gloves",
            Slot::Hair => "Hair",
            Slot::Hat => "Hat",
            Slot::Shoes => "Shoes",
            Slot::Socks => "Socks",
            Slot::Top => "Top",
            Slot::Presets => "Presets",
        }
    }

    /// Lowercase form used as the leading object-store key segment
    pub fn key_segment(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Body" => Ok(Slot::Body),
            "Bottoms" => Ok(Slot::Bottoms),
            "Bust" => Ok(Slot::Bust),
            "Eyes" => Ok(Slot::Eyes),
            "Gloves" => Ok(Slot::Gloves),
            "Hair" => Ok(Slot::Hair),
            "Hat" => Ok(Slot::Hat),
            "Shoes" => Ok(Slot::Shoes),
            "Socks" => Ok(Slot::Socks),
            "Top" => Ok(Slot::Top),
            "Presets" => Ok(Slot::Presets),
            _ => Err(format!("Invalid slot: {}", s)),
        }
    }
}
