//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use super::models::slots_used;
use crate::models::{InteractionEvent, SavedRoadmapSlot};

/// Newtype wrapper for the saved roadmap list, in display order.
///
/// # Examples
///
/// ```rust
/// use pathway_core::display::SavedRoadmaps;
///
/// let empty = SavedRoadmaps(vec![]);
/// assert_eq!(empty.to_string(), "No saved roadmaps.\n");
/// ```
#[derive(Debug, Clone)]
pub struct SavedRoadmaps(pub Vec<SavedRoadmapSlot>);

impl SavedRoadmaps {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of saved roadmaps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Ids in display order.
    pub fn ids(&self) -> Vec<u64> {
        self.0.iter().map(SavedRoadmapSlot::id).collect()
    }

    /// Get an iterator over the slots.
    pub fn iter(&self) -> std::slice::Iter<'_, SavedRoadmapSlot> {
        self.0.iter()
    }
}

impl Index<usize> for SavedRoadmaps {
    type Output = SavedRoadmapSlot;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for SavedRoadmaps {
    type Item = SavedRoadmapSlot;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SavedRoadmaps {
    type Item = &'a SavedRoadmapSlot;
    type IntoIter = std::slice::Iter<'a, SavedRoadmapSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for SavedRoadmaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No saved roadmaps.");
        }
        for slot in &self.0 {
            write!(f, "{slot}")?;
        }
        writeln!(f, "_{}_", slots_used(self.0.len()))
    }
}

/// Newtype wrapper for the interaction log.
#[derive(Debug, Clone)]
pub struct Interactions(pub Vec<InteractionEvent>);

impl Interactions {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of events.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the events.
    pub fn iter(&self) -> std::slice::Iter<'_, InteractionEvent> {
        self.0.iter()
    }
}

impl Index<usize> for Interactions {
    type Output = InteractionEvent;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Interactions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No interactions recorded.");
        }
        for event in &self.0 {
            write!(f, "{event}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{Phase, Roadmap, RoadmapData, RoadmapHeader, Task};

    fn slot(id: u64, position: u32, title: &str) -> SavedRoadmapSlot {
        let mut data = RoadmapData::default();
        data.roadmap
            .phases
            .push(Phase::new("P1", vec![Task::titled("Learn SQL")]).into());
        let mut roadmap = Roadmap::ephemeral(
            RoadmapHeader {
                title: title.to_string(),
                ..Default::default()
            },
            data,
        );
        roadmap.id = Some(id);
        SavedRoadmapSlot {
            position,
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            roadmap,
        }
    }

    #[test]
    fn test_saved_roadmaps_display() {
        let saved = SavedRoadmaps(vec![slot(4, 0, "Backend"), slot(2, 1, "Data")]);
        let output = saved.to_string();

        assert!(output.contains("## 1. Backend (ID: 4)"));
        assert!(output.contains("## 2. Data (ID: 2)"));
        assert!(output.ends_with("_2/3 slots used_\n"));
        assert_eq!(saved.ids(), vec![4, 2]);
        assert!(!output.starts_with("# "));
    }

    #[test]
    fn test_interactions_display_empty() {
        assert_eq!(
            Interactions(vec![]).to_string(),
            "No interactions recorded.\n"
        );
    }
}
