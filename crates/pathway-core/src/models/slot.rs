//! Saved roadmap slot definition.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Roadmap;

/// Maximum number of roadmaps a user may keep saved at once.
pub const MAX_SAVED_ROADMAPS: usize = 3;

/// A persisted, user-ordered entry in the saved roadmap collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedRoadmapSlot {
    /// Display rank (0-indexed), independent of creation time
    pub position: u32,

    /// Timestamp of the last change to the slot or its content (UTC)
    pub updated_at: Timestamp,

    /// The saved roadmap; its `id` is always set
    pub roadmap: Roadmap,
}

impl SavedRoadmapSlot {
    /// Identifier of the saved roadmap.
    pub fn id(&self) -> u64 {
        self.roadmap.id.unwrap_or_default()
    }
}

/// Direction of an adjacent move in the saved list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum MoveDirection {
    /// Towards position 0
    Up,
    /// Away from position 0
    Down,
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            _ => Err(format!("Invalid move direction: {s}")),
        }
    }
}

impl MoveDirection {
    /// Position of the neighbour in this direction, if there can be one.
    pub fn neighbour_of(self, position: u32) -> Option<u32> {
        match self {
            MoveDirection::Up => position.checked_sub(1),
            MoveDirection::Down => position.checked_add(1),
        }
    }
}
