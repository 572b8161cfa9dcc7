//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of save and
//! delete operations with consistent messaging and resource display.

use std::fmt;

use crate::models::SavedRoadmapSlot;

/// Wrapper type for displaying the result of save operations.
///
/// # Examples
///
/// ```rust
/// use pathway_core::{
///     display::CreateResult,
///     models::{Roadmap, RoadmapData, RoadmapHeader, SavedRoadmapSlot},
/// };
/// use jiff::Timestamp;
///
/// let mut roadmap = Roadmap::ephemeral(RoadmapHeader::default(), RoadmapData::default());
/// roadmap.id = Some(1);
/// let slot = SavedRoadmapSlot { position: 0, updated_at: Timestamp::now(), roadmap };
///
/// let output = CreateResult::new(slot).to_string();
/// assert!(output.contains("Saved roadmap with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<SavedRoadmapSlot> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Saved roadmap with ID: {} in slot {}",
            self.resource.id(),
            self.resource.position + 1
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
///
/// Deleting something that is already gone is reported, not treated as a
/// failure.
pub struct DeleteResult<T> {
    pub id: u64,
    pub resource: Option<T>,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(id: u64, resource: Option<T>) -> Self {
        Self { id, resource }
    }
}

impl fmt::Display for DeleteResult<SavedRoadmapSlot> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource {
            Some(slot) => writeln!(
                f,
                "Deleted roadmap '{}' (ID: {})",
                slot.roadmap.title, self.id
            ),
            None => writeln!(f, "Roadmap with ID {} was already gone", self.id),
        }
    }
}
