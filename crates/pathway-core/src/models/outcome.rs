//! Results of task actions and regenerations.

use std::sync::Arc;

use serde::Serialize;

use super::{ActionType, FeedbackType, Roadmap, Task};
use crate::tree::TaskRef;

/// A committed task regeneration.
#[derive(Debug, Clone, Serialize)]
pub struct Regeneration {
    /// The roadmap as stored after the replacement
    pub roadmap: Roadmap,
    /// Where the replaced task sits
    pub replaced_at: TaskRef,
    pub feedback_type: FeedbackType,
    pub previous_task: Arc<Task>,
    pub new_task: Arc<Task>,
}

/// What handling one task action did.
#[derive(Debug, Clone, Serialize)]
pub struct TaskActionOutcome {
    pub action: ActionType,
    pub task_identity: String,
    /// Storage id of the interaction event, `None` if logging failed
    pub event_id: Option<u64>,
    /// Present for `skip`, which replaces the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regeneration: Option<Regeneration>,
}

impl TaskActionOutcome {
    /// Whether the interaction event was stored.
    pub fn logged(&self) -> bool {
        self.event_id.is_some()
    }
}
