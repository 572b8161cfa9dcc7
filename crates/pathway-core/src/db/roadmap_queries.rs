//! Saved roadmap persistence, capacity and ordering.

use jiff::Timestamp;
use log::{debug, info};
use rusqlite::{params, OptionalExtension, Transaction, TransactionBehavior};

use super::{text_conversion_error, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, RoadmapError},
    models::{
        MoveDirection, Roadmap, RoadmapData, RoadmapType, SavedRoadmapSlot, MAX_SAVED_ROADMAPS,
    },
};

const COUNT_ROADMAPS_SQL: &str = "SELECT COUNT(*) FROM roadmaps WHERE user_id = ?1";
const NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM roadmaps WHERE user_id = ?1";
const INSERT_ROADMAP_SQL: &str = "INSERT INTO roadmaps (user_id, title, target_career, roadmap_type, job_id, roadmap_data, position, revision, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_ROADMAP_COLUMNS: &str = "SELECT id, title, target_career, roadmap_type, job_id, roadmap_data, position, revision, created_at, updated_at FROM roadmaps";
const SELECT_POSITION_SQL: &str = "SELECT position FROM roadmaps WHERE id = ?1 AND user_id = ?2";
const SELECT_ID_AT_POSITION_SQL: &str =
    "SELECT id FROM roadmaps WHERE user_id = ?1 AND position = ?2";
const CHECK_ROADMAP_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM roadmaps WHERE id = ?1 AND user_id = ?2)";
const DELETE_ROADMAP_SQL: &str = "DELETE FROM roadmaps WHERE id = ?1 AND user_id = ?2";
// Compaction goes through negative positions so UNIQUE(user_id, position)
// never sees two rows on the same rank mid-statement.
const NEGATE_POSITIONS_AFTER_SQL: &str =
    "UPDATE roadmaps SET position = -position, updated_at = ?1 WHERE user_id = ?2 AND position > ?3";
const RESTORE_NEGATED_POSITIONS_SQL: &str =
    "UPDATE roadmaps SET position = -position - 1 WHERE user_id = ?1 AND position < 0";
const UPDATE_POSITION_TEMP_SQL: &str =
    "UPDATE roadmaps SET position = -1, updated_at = ?1 WHERE id = ?2";
const UPDATE_POSITION_SQL: &str =
    "UPDATE roadmaps SET position = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_CONTENT_SQL: &str = "UPDATE roadmaps SET roadmap_data = ?1, revision = ?2, updated_at = ?3 WHERE id = ?4 AND user_id = ?5 AND revision = ?6";

impl super::Database {
    fn build_slot_from_row(row: &rusqlite::Row) -> rusqlite::Result<SavedRoadmapSlot> {
        let type_str: String = row.get(3)?;
        let roadmap_type = type_str
            .parse::<RoadmapType>()
            .map_err(|e| text_conversion_error(3, e))?;

        let data_str: String = row.get(5)?;
        let data: RoadmapData = serde_json::from_str(&data_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let roadmap = Roadmap {
            id: Some(row.get::<_, i64>(0)? as u64),
            title: row.get(1)?,
            target_career: row.get(2)?,
            roadmap_type,
            job_id: row.get::<_, Option<i64>>(4)?.map(|id| id as u64),
            role_summary: data.role_summary,
            gap_analysis: data.gap_analysis,
            phases: data.roadmap.phases,
            extra: data.extra,
            roadmap_extra: data.roadmap.extra,
            revision: row.get::<_, i64>(7)? as u64,
            created_at: timestamp_column(row, 8)?,
        };

        Ok(SavedRoadmapSlot {
            position: row.get::<_, i64>(6)? as u32,
            updated_at: timestamp_column(row, 9)?,
            roadmap,
        })
    }

    /// Persists `roadmap` as a new slot at the end of the user's list.
    ///
    /// Fails with [`RoadmapError::Capacity`] when the user already has
    /// [`MAX_SAVED_ROADMAPS`] slots; nothing is written in that case. The
    /// roadmap always gets a fresh id, even if it was saved before.
    pub fn save_roadmap(&mut self, user_id: u64, roadmap: &Roadmap) -> Result<SavedRoadmapSlot> {
        let data_json = serde_json::to_string(&roadmap.data())?;

        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let count: i64 = tx
            .query_row(COUNT_ROADMAPS_SQL, params![user_id as i64], |row| row.get(0))
            .db_context("Failed to count saved roadmaps")?;
        if count as usize >= MAX_SAVED_ROADMAPS {
            info!("User {user_id} is at the saved roadmap limit ({MAX_SAVED_ROADMAPS})");
            return Err(RoadmapError::Capacity {
                limit: MAX_SAVED_ROADMAPS,
            });
        }

        let position: i64 = tx
            .query_row(NEXT_POSITION_SQL, params![user_id as i64], |row| row.get(0))
            .db_context("Failed to compute next position")?;

        let now = Timestamp::now();
        tx.execute(
            INSERT_ROADMAP_SQL,
            params![
                user_id as i64,
                &roadmap.title,
                roadmap.target_career.as_deref(),
                roadmap.roadmap_type.as_str(),
                roadmap.job_id.map(|id| id as i64),
                &data_json,
                position,
                roadmap.revision as i64,
                roadmap.created_at.to_string(),
                now.to_string(),
            ],
        )
        .db_context("Failed to insert roadmap")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Saved roadmap {id} at position {position} for user {user_id}");

        Ok(SavedRoadmapSlot {
            position: position as u32,
            updated_at: now,
            roadmap: Roadmap {
                id: Some(id),
                ..roadmap.clone()
            },
        })
    }

    /// Lists the user's saved roadmaps in display order.
    ///
    /// A single statement reads the whole list, so a concurrent reorder is
    /// observed either entirely or not at all.
    pub fn list_roadmaps(&self, user_id: u64) -> Result<Vec<SavedRoadmapSlot>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "{SELECT_ROADMAP_COLUMNS} WHERE user_id = ?1 ORDER BY position"
            ))
            .db_context("Failed to prepare query")?;

        let slots = stmt
            .query_map(params![user_id as i64], Self::build_slot_from_row)
            .db_context("Failed to query roadmaps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch roadmaps")?;

        Ok(slots)
    }

    /// Retrieves one saved roadmap.
    pub fn get_roadmap(&self, user_id: u64, id: u64) -> Result<Option<SavedRoadmapSlot>> {
        self.connection
            .query_row(
                &format!("{SELECT_ROADMAP_COLUMNS} WHERE id = ?1 AND user_id = ?2"),
                params![id as i64, user_id as i64],
                Self::build_slot_from_row,
            )
            .optional()
            .db_context("Failed to query roadmap")
    }

    /// Deletes a saved roadmap and closes the gap it leaves in the ordering.
    ///
    /// Returns the removed slot, or `None` when there was nothing to delete.
    pub fn delete_roadmap(&mut self, user_id: u64, id: u64) -> Result<Option<SavedRoadmapSlot>> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let removed = tx
            .query_row(
                &format!("{SELECT_ROADMAP_COLUMNS} WHERE id = ?1 AND user_id = ?2"),
                params![id as i64, user_id as i64],
                Self::build_slot_from_row,
            )
            .optional()
            .db_context("Failed to query roadmap")?;
        let Some(removed) = removed else {
            return Ok(None);
        };
        let position = i64::from(removed.position);

        tx.execute(DELETE_ROADMAP_SQL, params![id as i64, user_id as i64])
            .db_context("Failed to delete roadmap")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            NEGATE_POSITIONS_AFTER_SQL,
            params![&now_str, user_id as i64, position],
        )
        .db_context("Failed to shift positions")?;
        tx.execute(RESTORE_NEGATED_POSITIONS_SQL, params![user_id as i64])
            .db_context("Failed to compact positions")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Deleted roadmap {id} for user {user_id}");

        Ok(Some(removed))
    }

    /// Exchanges the display positions of two saved roadmaps.
    pub fn swap_roadmaps(&mut self, user_id: u64, first: u64, second: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let first_position = Self::position_of(&tx, user_id, first)?
            .ok_or(RoadmapError::RoadmapNotFound { id: first })?;
        let second_position = Self::position_of(&tx, user_id, second)?
            .ok_or(RoadmapError::RoadmapNotFound { id: second })?;

        if first != second {
            Self::exchange_positions(&tx, (first, first_position), (second, second_position))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Swaps a saved roadmap with its neighbour in `direction`.
    ///
    /// Returns `false` without changing anything when the roadmap is
    /// already at that end of the list.
    pub fn move_roadmap(
        &mut self,
        user_id: u64,
        id: u64,
        direction: MoveDirection,
    ) -> Result<bool> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let position =
            Self::position_of(&tx, user_id, id)?.ok_or(RoadmapError::RoadmapNotFound { id })?;

        let neighbour = match direction.neighbour_of(position as u32) {
            Some(target) => tx
                .query_row(
                    SELECT_ID_AT_POSITION_SQL,
                    params![user_id as i64, target as i64],
                    |row| row.get::<_, i64>(0),
                )
                .optional()
                .db_context("Failed to query neighbour")?
                .map(|neighbour_id| (neighbour_id as u64, i64::from(target))),
            None => None,
        };

        let Some(neighbour) = neighbour else {
            return Ok(false);
        };

        Self::exchange_positions(&tx, (id, position), neighbour)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(true)
    }

    /// Replaces a saved roadmap's content if its revision is still
    /// `expected_revision`.
    ///
    /// Fails with [`RoadmapError::StaleRoadmap`] when another writer got
    /// there first, and with [`RoadmapError::RoadmapNotFound`] when the
    /// roadmap was deleted. Returns the new `updated_at`.
    pub fn update_roadmap_content(
        &mut self,
        user_id: u64,
        roadmap: &Roadmap,
        expected_revision: u64,
    ) -> Result<Timestamp> {
        let id = roadmap.id.ok_or_else(|| {
            RoadmapError::invalid_input("roadmap").with_reason("Roadmap has not been saved")
        })?;
        let data_json = serde_json::to_string(&roadmap.data())?;
        let now = Timestamp::now();

        let updated = self
            .connection
            .execute(
                UPDATE_CONTENT_SQL,
                params![
                    &data_json,
                    roadmap.revision as i64,
                    now.to_string(),
                    id as i64,
                    user_id as i64,
                    expected_revision as i64,
                ],
            )
            .db_context("Failed to update roadmap content")?;

        if updated == 0 {
            let exists: bool = self
                .connection
                .query_row(
                    CHECK_ROADMAP_EXISTS_SQL,
                    params![id as i64, user_id as i64],
                    |row| row.get(0),
                )
                .db_context("Failed to check roadmap existence")?;
            return Err(if exists {
                RoadmapError::StaleRoadmap { id }
            } else {
                RoadmapError::RoadmapNotFound { id }
            });
        }

        Ok(now)
    }

    fn position_of(tx: &Transaction, user_id: u64, id: u64) -> Result<Option<i64>> {
        tx.query_row(
            SELECT_POSITION_SQL,
            params![id as i64, user_id as i64],
            |row| row.get(0),
        )
        .optional()
        .db_context("Failed to query roadmap position")
    }

    fn exchange_positions(tx: &Transaction, first: (u64, i64), second: (u64, i64)) -> Result<()> {
        let now_str = Timestamp::now().to_string();

        // Use a temporary negative value to avoid unique constraint violation
        tx.execute(UPDATE_POSITION_TEMP_SQL, params![&now_str, first.0 as i64])
            .db_context("Failed to park first roadmap")?;
        tx.execute(
            UPDATE_POSITION_SQL,
            params![first.1, &now_str, second.0 as i64],
        )
        .db_context("Failed to move second roadmap")?;
        tx.execute(
            UPDATE_POSITION_SQL,
            params![second.1, &now_str, first.0 as i64],
        )
        .db_context("Failed to move first roadmap")?;

        Ok(())
    }
}
