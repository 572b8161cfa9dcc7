//! Task model definition and identity rules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An atomic learning unit inside a phase.
///
/// Fields the core does not interpret are kept in `extra` so a task read
/// from storage serializes back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Server-assigned identifier; absent on legacy data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Title of the task (always present)
    pub title: String,

    /// Paragraph describing the work
    #[serde(default)]
    pub description: String,

    /// Job description requirements this task covers
    #[serde(default)]
    pub jd_alignment: Vec<String>,

    /// Smaller units of work
    #[serde(default)]
    pub subtasks: Vec<String>,

    /// Skills the learner picks up
    #[serde(default)]
    pub skills_gained: Vec<String>,

    /// Actions the UI offers on this task
    #[serde(default)]
    pub status_options: Vec<String>,

    /// Suggested courses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_courses: Vec<Value>,

    /// Suggested projects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_projects: Vec<Value>,

    /// Any additional generator fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Creates a task with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the task id.
    pub fn with_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// The explicit task id, treating an empty string as absent.
    pub fn explicit_id(&self) -> Option<&str> {
        self.task_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Effective identity: `task_id` when present, otherwise `title`.
    pub fn identity(&self) -> &str {
        self.explicit_id().unwrap_or(&self.title)
    }

    /// Whether this task answers to `identity`.
    ///
    /// A task with an id only matches on its id; the title is consulted
    /// only when the id is absent.
    pub fn answers_to(&self, identity: &str) -> bool {
        match self.explicit_id() {
            Some(id) => id == identity,
            None => self.title == identity,
        }
    }
}
