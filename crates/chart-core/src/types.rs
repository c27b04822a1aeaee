// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, margins, entity ids).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default surface width in pixels.
pub const WIDTH: i32 = 960;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 540;

/// Screen margins around the plotting area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(64, 24, 32, 56)
    }
}

/// Identifier of a renderable entity (district, category label, series).
///
/// Upstream JSON uses both numbers (`"district": 3`) and strings
/// (`"split": "R5/D2"`); both deserialize into the same textual id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self { Self(s) }
}

impl From<u32> for EntityId {
    fn from(n: u32) -> Self { Self(n.to_string()) }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
            Raw::Float(x) => Self(x.to_string()),
        })
    }
}
