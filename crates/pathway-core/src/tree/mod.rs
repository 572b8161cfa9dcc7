//! Locating and replacing tasks inside a roadmap tree.
//!
//! Both operations are synchronous and pure: [`resolve`] never mutates, and
//! [`replace_task`] returns a new [`Roadmap`](crate::models::Roadmap) while
//! the input stays valid for rollback.
//!
//! ```rust
//! use pathway_core::models::{Phase, Roadmap, RoadmapData, RoadmapHeader, Task};
//! use pathway_core::tree::{replace_task, resolve, TaskSelector};
//!
//! let mut data = RoadmapData::default();
//! data.roadmap.phases.push(
//!     Phase::new(
//!         "Foundations",
//!         vec![Task::titled("Learn SQL"), Task::titled("Learn Python").with_id("t2")],
//!     )
//!     .into(),
//! );
//! let roadmap = Roadmap::ephemeral(RoadmapHeader::default(), data);
//!
//! let at = resolve(&roadmap, &TaskSelector::new("t2")).unwrap();
//! let updated = replace_task(&roadmap, at, Task::titled("Learn Pandas").with_id("t2")).unwrap();
//!
//! assert_eq!(updated.phases[0].tasks[0].title, "Learn SQL");
//! assert_eq!(updated.phases[0].tasks[1].title, "Learn Pandas");
//! assert_eq!(roadmap.phases[0].tasks[1].title, "Learn Python");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod edit;
pub mod resolve;


pub use edit::replace_task;
pub use resolve::{resolve, resolve_all};

/// Location of one task: phase index, then task index within that phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TaskRef {
    /// 0-indexed phase position
    pub phase: usize,
    /// 0-indexed task position within the phase
    pub task: usize,
}

impl TaskRef {
    pub fn new(phase: usize, task: usize) -> Self {
        Self { phase, task }
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {}, task {}", self.phase + 1, self.task + 1)
    }
}

/// What a caller knows about the task it wants.
///
/// `position` disambiguates tasks that share an identity; it is only a
/// hint and is ignored when the task found there answers to a different
/// identity (for example after the roadmap was re-rendered).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TaskSelector {
    /// `task_id` if the task has one, otherwise its title
    pub identity: String,
    /// Optional position hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TaskRef>,
}

impl TaskSelector {
    /// Selects by identity alone.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            position: None,
        }
    }

    /// Adds a position hint.
    pub fn at(mut self, position: TaskRef) -> Self {
        self.position = Some(position);
        self
    }
}

impl From<&str> for TaskSelector {
    fn from(identity: &str) -> Self {
        Self::new(identity)
    }
}
