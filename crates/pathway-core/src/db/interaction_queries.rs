//! Append-only interaction log.

use rusqlite::params;

use super::{text_conversion_error, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{ActionType, DifficultyRating, InteractionEvent},
};

const INSERT_INTERACTION_SQL: &str = "INSERT INTO interactions (user_id, roadmap_id, job_id, task_id, action_type, difficulty_rating, duration_seconds, reward, recorded_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const SELECT_INTERACTION_COLUMNS: &str = "SELECT id, roadmap_id, job_id, task_id, action_type, difficulty_rating, duration_seconds, reward, recorded_at FROM interactions";

impl super::Database {
    fn build_interaction_from_row(row: &rusqlite::Row) -> rusqlite::Result<InteractionEvent> {
        let action_str: String = row.get(4)?;
        let action_type = action_str
            .parse::<ActionType>()
            .map_err(|e| text_conversion_error(4, e))?;

        let difficulty_rating = row
            .get::<_, Option<i64>>(5)?
            .map(|raw| {
                u8::try_from(raw)
                    .map_err(|e| e.to_string())
                    .and_then(DifficultyRating::new)
                    .map_err(|e| text_conversion_error(5, e))
            })
            .transpose()?;

        Ok(InteractionEvent {
            id: Some(row.get::<_, i64>(0)? as u64),
            roadmap_id: row.get::<_, Option<i64>>(1)?.map(|id| id as u64),
            job_id: row.get::<_, Option<i64>>(2)?.map(|id| id as u64),
            task_identity: row.get(3)?,
            action_type,
            difficulty_rating,
            duration_seconds: row.get::<_, Option<i64>>(6)?.map(|secs| secs as u32),
            reward: row.get(7)?,
            recorded_at: timestamp_column(row, 8)?,
        })
    }

    /// Appends one event and returns its storage id.
    pub fn insert_interaction(&mut self, user_id: u64, event: &InteractionEvent) -> Result<u64> {
        self.connection
            .execute(
                INSERT_INTERACTION_SQL,
                params![
                    user_id as i64,
                    event.roadmap_id.map(|id| id as i64),
                    event.job_id.map(|id| id as i64),
                    &event.task_identity,
                    event.action_type.as_str(),
                    event.difficulty_rating.map(DifficultyRating::get),
                    event.duration_seconds,
                    event.reward,
                    event.recorded_at.to_string(),
                ],
            )
            .db_context("Failed to insert interaction")?;

        Ok(self.connection.last_insert_rowid() as u64)
    }

    /// Lists the user's events in recording order, optionally restricted to
    /// one roadmap.
    pub fn list_interactions(
        &self,
        user_id: u64,
        roadmap_id: Option<u64>,
    ) -> Result<Vec<InteractionEvent>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "{SELECT_INTERACTION_COLUMNS} WHERE user_id = ?1 AND (?2 IS NULL OR roadmap_id = ?2) ORDER BY id"
            ))
            .db_context("Failed to prepare query")?;

        let events = stmt
            .query_map(
                params![user_id as i64, roadmap_id.map(|id| id as i64)],
                Self::build_interaction_from_row,
            )
            .db_context("Failed to query interactions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch interactions")?;

        Ok(events)
    }
}
