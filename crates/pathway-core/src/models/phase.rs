//! Phase model definition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Task;

/// An ordered grouping of tasks within a roadmap.
///
/// Tasks are held behind `Arc` so that replacing one task can share every
/// untouched sibling with the previous version of the phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// Optional identifier; legacy data relies on position instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<u32>,

    /// Display name of the phase
    #[serde(default)]
    pub phase_name: String,

    /// What the learner should be able to do at the end of the phase
    #[serde(default)]
    pub goal: String,

    /// Estimated effort in weeks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_weeks: Option<u32>,

    /// Ordered tasks
    #[serde(default)]
    pub tasks: Vec<Arc<Task>>,

    /// Other phase fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Phase {
    /// Creates a named phase holding `tasks`.
    pub fn new(phase_name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            phase_name: phase_name.into(),
            tasks: tasks.into_iter().map(Arc::new).collect(),
            ..Default::default()
        }
    }
}
