//! Data models for roadmaps, phases, tasks and interaction events.
//!
//! This module contains the core domain models. Display implementations for
//! these models live in [`crate::display::models`] so presentation stays out
//! of the data structures.
//!
//! # Tree Shape
//!
//! A [`Roadmap`] owns an ordered list of [`Phase`]s, each owning an ordered
//! list of [`Task`]s. Both levels are held behind `Arc` so that replacing a
//! single task copies only the path from the root to that task and shares
//! every other node with the previous version.
//!
//! # Task Identity
//!
//! A task's effective identity is its `task_id` when present, otherwise its
//! `title`:
//!
//! ```rust
//! use pathway_core::models::Task;
//!
//! let legacy = Task::titled("Learn SQL");
//! assert_eq!(legacy.identity(), "Learn SQL");
//!
//! let current = Task::titled("Learn Python").with_id("t2");
//! assert_eq!(current.identity(), "t2");
//! assert!(!current.answers_to("Learn Python"));
//! ```

pub mod actions;
pub mod interaction;
pub mod outcome;
pub mod phase;
pub mod roadmap;
pub mod slot;
pub mod task;


pub use actions::{ActionType, DifficultyRating, FeedbackType};
pub use interaction::{reward_for, InteractionEvent};
pub use outcome::{Regeneration, TaskActionOutcome};
pub use phase::Phase;
pub use roadmap::{PhaseList, Roadmap, RoadmapData, RoadmapHeader, RoadmapType};
pub use slot::{MoveDirection, SavedRoadmapSlot, MAX_SAVED_ROADMAPS};
pub use task::Task;
