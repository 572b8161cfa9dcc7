//! Storage operations for the Navigator.
//!
//! Each call opens its own connection on a blocking thread.

use jiff::Timestamp;
use tokio::task;

use super::Navigator;
use crate::{
    db::Database,
    error::{Result, RoadmapError},
    models::{InteractionEvent, MoveDirection, Roadmap, SavedRoadmapSlot},
};

impl Navigator {
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database, u64) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let user_id = self.user_id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db, user_id)
        })
        .await
        .map_err(RoadmapError::join)?
    }

    /// Persists `roadmap` in a new slot.
    pub async fn save_slot(&self, roadmap: Roadmap) -> Result<SavedRoadmapSlot> {
        self.with_database(move |db, user_id| db.save_roadmap(user_id, &roadmap))
            .await
    }

    /// Retrieves one saved roadmap.
    pub async fn get_slot(&self, id: u64) -> Result<Option<SavedRoadmapSlot>> {
        self.with_database(move |db, user_id| db.get_roadmap(user_id, id))
            .await
    }

    /// Lists the saved roadmaps in display order.
    pub async fn list_slots(&self) -> Result<Vec<SavedRoadmapSlot>> {
        self.with_database(|db, user_id| db.list_roadmaps(user_id))
            .await
    }

    /// Deletes a saved roadmap, returning it if it existed.
    pub async fn delete_slot(&self, id: u64) -> Result<Option<SavedRoadmapSlot>> {
        self.with_database(move |db, user_id| db.delete_roadmap(user_id, id))
            .await
    }

    /// Exchanges the positions of two saved roadmaps.
    pub async fn swap_slots(&self, first: u64, second: u64) -> Result<()> {
        self.with_database(move |db, user_id| db.swap_roadmaps(user_id, first, second))
            .await
    }

    /// Swaps a saved roadmap with its neighbour.
    pub async fn move_slot(&self, id: u64, direction: MoveDirection) -> Result<bool> {
        self.with_database(move |db, user_id| db.move_roadmap(user_id, id, direction))
            .await
    }

    /// Stores new content for a saved roadmap if nobody else changed it
    /// since `expected_revision`.
    pub async fn store_content(
        &self,
        roadmap: Roadmap,
        expected_revision: u64,
    ) -> Result<Timestamp> {
        self.with_database(move |db, user_id| {
            db.update_roadmap_content(user_id, &roadmap, expected_revision)
        })
        .await
    }

    /// Reads the interaction log.
    pub async fn list_events(&self, roadmap_id: Option<u64>) -> Result<Vec<InteractionEvent>> {
        self.with_database(move |db, user_id| db.list_interactions(user_id, roadmap_id))
            .await
    }
}
