//! Interaction event model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ActionType, DifficultyRating, Task};

/// Immutable record of one user action on a task.
///
/// Events are append-only; nothing in this crate updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionEvent {
    /// Storage id, assigned once the event is persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Effective identity of the task acted on
    pub task_identity: String,

    /// What the user did
    pub action_type: ActionType,

    /// Present only for `rate_difficulty`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_rating: Option<DifficultyRating>,

    /// Saved roadmap the task belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap_id: Option<u64>,

    /// Job posting the roadmap targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<u64>,

    /// Time spent on the task, when the client measured it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,

    /// Reward signal for downstream recommendation
    pub reward: f64,

    /// Timestamp when the action happened (UTC)
    pub recorded_at: Timestamp,
}

impl InteractionEvent {
    /// Builds the event for `action` on `task`.
    ///
    /// The rating is kept only for `rate_difficulty`.
    pub fn for_task(
        task: &Task,
        action_type: ActionType,
        rating: Option<DifficultyRating>,
    ) -> Self {
        Self::for_identity(task.identity(), action_type, rating)
    }

    /// Builds the event for `action` on the task known by `identity`, for
    /// when the task itself could not be located.
    pub fn for_identity(
        identity: &str,
        action_type: ActionType,
        rating: Option<DifficultyRating>,
    ) -> Self {
        let difficulty_rating = match action_type {
            ActionType::RateDifficulty => rating,
            _ => None,
        };
        Self {
            id: None,
            task_identity: identity.to_string(),
            action_type,
            difficulty_rating,
            roadmap_id: None,
            job_id: None,
            duration_seconds: None,
            reward: reward_for(action_type, difficulty_rating),
            recorded_at: Timestamp::now(),
        }
    }

    /// Attaches the roadmap and job the task belongs to.
    pub fn in_roadmap(mut self, roadmap_id: Option<u64>, job_id: Option<u64>) -> Self {
        self.roadmap_id = roadmap_id;
        self.job_id = job_id;
        self
    }

    /// Attaches a measured duration.
    pub fn with_duration(mut self, duration_seconds: Option<u32>) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }
}

/// Reward attached to an action: completing is positive, skipping is
/// negative, and ratings scale from too hard (-1.0) to too easy (1.0).
pub fn reward_for(action_type: ActionType, rating: Option<DifficultyRating>) -> f64 {
    match action_type {
        ActionType::Complete => 1.0,
        ActionType::Skip => -0.5,
        ActionType::Start => 0.0,
        ActionType::RateDifficulty => match rating.map(DifficultyRating::get) {
            Some(1) => -1.0,
            Some(2) => -0.5,
            Some(3) => 0.1,
            Some(4) => 0.5,
            Some(5) => 1.0,
            _ => 0.0,
        },
    }
}
