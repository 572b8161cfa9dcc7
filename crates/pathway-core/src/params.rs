//! Parameter structures for navigator operations
//!
//! These structures are shared by every interface (CLI, MCP) so the
//! navigator sees one shape per operation. They carry only serde derives,
//! plus `schemars::JsonSchema` when the `schema` feature is on.
//!
//! Interface layers wrap or convert into them:
//!
//! ```ignore
//! // In the CLI
//! impl From<SkipArgs> for TaskAction { ... }
//!
//! // In the MCP server
//! #[derive(Deserialize, JsonSchema)]
//! #[serde(transparent)]
//! struct TaskActionRequest(pathway_core::params::TaskAction);
//! ```
//!
//! Raw values that need validation (ratings, targets, roadmap payloads) are
//! kept raw here and checked by the accessor methods, so every interface
//! reports the same [`RoadmapError::InvalidInput`].

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{Result, RoadmapError},
    generator::GenerationTarget,
    models::{ActionType, DifficultyRating, FeedbackType, MoveDirection, RoadmapData, RoadmapType},
    tree::{TaskRef, TaskSelector},
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_roadmap and delete_roadmap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the saved roadmap to operate on
    pub id: u64,
}

/// Parameters for generating a new, unsaved roadmap.
///
/// Exactly one target is needed: a job posting id or a career goal. When
/// both are given the job wins and the career is kept as the roadmap's
/// `target_career`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateRoadmap {
    /// Job posting to build the roadmap against
    pub job_id: Option<u64>,
    /// Free-text career goal
    pub target_career: Option<String>,
    /// Title override; defaults to the generated role title
    pub title: Option<String>,
}

impl GenerateRoadmap {
    /// The generation target these parameters describe.
    pub fn target(&self) -> Result<GenerationTarget> {
        if let Some(job_id) = self.job_id {
            return Ok(GenerationTarget::Job { job_id });
        }
        match self.target_career.as_deref().map(str::trim) {
            Some(career) if !career.is_empty() => Ok(GenerationTarget::Career {
                career: career.to_string(),
            }),
            _ => Err(RoadmapError::invalid_input("target")
                .with_reason("Either job_id or target_career is required")),
        }
    }
}

/// Parameters for saving a roadmap into one of the user's slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SaveRoadmap {
    /// Roadmap content: `{role_summary, gap_analysis, roadmap: {phases}}`
    pub roadmap_data: Value,
    /// Display title
    pub title: String,
    /// Job posting the roadmap was built for
    pub job_id: Option<u64>,
    /// `job` or `career`
    #[serde(default)]
    pub roadmap_type: RoadmapType,
    /// Career the roadmap leads to
    pub target_career: Option<String>,
}

impl SaveRoadmap {
    /// Parses and shape-checks `roadmap_data`.
    pub fn data(&self) -> Result<RoadmapData> {
        if self.title.trim().is_empty() {
            return Err(RoadmapError::invalid_input("title").with_reason("Title cannot be empty"));
        }
        let data: RoadmapData = serde_json::from_value(self.roadmap_data.clone())
            .map_err(|e| RoadmapError::invalid_input("roadmap_data").with_reason(e.to_string()))?;
        data.validate_shape()
            .map_err(|reason| RoadmapError::invalid_input("roadmap_data").with_reason(reason))?;
        Ok(data)
    }
}

/// Parameters for exchanging the positions of two saved roadmaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReorderRoadmaps {
    /// ID of the first roadmap
    pub first_id: u64,
    /// ID of the second roadmap
    pub second_id: u64,
}

/// Parameters for moving a saved roadmap one position up or down.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveRoadmap {
    /// ID of the roadmap to move
    pub id: u64,
    /// `up` (towards the top) or `down`
    pub direction: MoveDirection,
}

/// How a request points at a task: identity plus optional position hint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskPointer {
    /// `task_id` of the task, or its title when it has no id
    pub task: String,
    /// 0-indexed phase of the task, used to tell apart duplicate titles
    pub phase_index: Option<usize>,
    /// 0-indexed position of the task within its phase
    pub task_index: Option<usize>,
}

impl TaskPointer {
    /// The selector for this pointer. The hint is used only when both
    /// indexes are given.
    pub fn selector(&self) -> Result<TaskSelector> {
        if self.task.trim().is_empty() {
            return Err(
                RoadmapError::invalid_input("task").with_reason("Task identity cannot be empty")
            );
        }
        let selector = TaskSelector::new(self.task.clone());
        Ok(match (self.phase_index, self.task_index) {
            (Some(phase), Some(task)) => selector.at(TaskRef::new(phase, task)),
            _ => selector,
        })
    }
}

fn parse_rating(raw: Option<u8>) -> Result<Option<DifficultyRating>> {
    raw.map(DifficultyRating::new)
        .transpose()
        .map_err(|reason| RoadmapError::invalid_input("rating").with_reason(reason))
}

/// Parameters for regenerating one task of a saved roadmap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RegenerateTask {
    /// ID of the saved roadmap
    pub roadmap_id: u64,
    /// Which task to replace
    #[serde(flatten)]
    pub pointer: TaskPointer,
    /// Why the task is being replaced
    #[serde(default)]
    pub feedback_type: FeedbackType,
    /// Optional difficulty rating (1 = too hard, 5 = too easy)
    pub rating: Option<u8>,
}

impl RegenerateTask {
    /// The validated rating, if one was given.
    pub fn rating(&self) -> Result<Option<DifficultyRating>> {
        parse_rating(self.rating)
    }
}

/// Parameters for a user action on a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskAction {
    /// ID of the saved roadmap
    pub roadmap_id: u64,
    /// Which task was acted on
    #[serde(flatten)]
    pub pointer: TaskPointer,
    /// `start`, `complete`, `skip` or `rate_difficulty`
    pub action: ActionType,
    /// Difficulty rating, required for `rate_difficulty`
    pub rating: Option<u8>,
    /// Time spent on the task
    pub duration_seconds: Option<u32>,
}

impl TaskAction {
    /// The validated rating; required for `rate_difficulty` and ignored
    /// otherwise.
    pub fn rating(&self) -> Result<Option<DifficultyRating>> {
        match (self.action, parse_rating(self.rating)?) {
            (ActionType::RateDifficulty, None) => Err(RoadmapError::invalid_input("rating")
                .with_reason("A rating between 1 and 5 is required for rate_difficulty")),
            (ActionType::RateDifficulty, rating) => Ok(rating),
            _ => Ok(None),
        }
    }
}

/// Parameters for reading back the interaction log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListInteractions {
    /// Restrict to one saved roadmap
    pub roadmap_id: Option<u64>,
}
