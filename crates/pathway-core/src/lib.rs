//! Core library for the Pathway adaptive learning roadmap application.
//!
//! This crate holds the business logic for generated learning roadmaps:
//! the roadmap tree and its copy-on-write task replacement, single-flight
//! task regeneration against an external content generator, a best-effort
//! interaction log, and a capacity-limited, user-ordered collection of
//! saved roadmaps.
//!
//! # Layers
//!
//! - **Domain Models** ([`models`]): roadmap, phase, task, interaction
//!   events and saved slots
//! - **Tree** ([`tree`]): identity resolution and task replacement, pure and
//!   synchronous
//! - **Seams** ([`generator`], [`logger`]): traits for the external content
//!   generator and the interaction sink
//! - **Storage** ([`db`]): SQLite persistence
//! - **Service** ([`navigator`]): the [`Navigator`] composing all of the
//!   above
//! - **Display** ([`display`]): markdown formatting for terminals and MCP
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pathway_core::{
//!     generator::CommandGenerator,
//!     params::{GenerateRoadmap, TaskAction, TaskPointer},
//!     ActionType, NavigatorBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let navigator = NavigatorBuilder::new()
//!     .with_database_path(Some("pathway.db"))
//!     .with_generator(CommandGenerator::new("pathway-generator"))
//!     .build()
//!     .await?;
//!
//! let roadmap = navigator
//!     .generate_roadmap(&GenerateRoadmap {
//!         target_career: Some("Data Engineer".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! let slot = navigator.save_generated(&roadmap).await?;
//!
//! // Skipping a task logs the action and regenerates the task.
//! let outcome = navigator
//!     .handle_task_action(&TaskAction {
//!         roadmap_id: slot.id(),
//!         pointer: TaskPointer {
//!             task: "Learn SQL".to_string(),
//!             ..Default::default()
//!         },
//!         action: ActionType::Skip,
//!         rating: None,
//!         duration_seconds: None,
//!     })
//!     .await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod gate;
pub mod generator;
pub mod logger;
pub mod models;
pub mod navigator;
pub mod params;
pub mod tree;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Interactions, LocalDateTime, OperationStatus, SavedRoadmaps,
};
pub use error::{Result, RoadmapError};
pub use gate::{RegenerationGate, RegenerationState};
pub use generator::{ContentGenerator, GenerationTarget, GeneratorError};
pub use logger::{InteractionLogger, InteractionSink};
pub use models::{
    ActionType, DifficultyRating, FeedbackType, InteractionEvent, MoveDirection, Phase,
    Regeneration, Roadmap, RoadmapType, SavedRoadmapSlot, Task, TaskActionOutcome,
    MAX_SAVED_ROADMAPS,
};
pub use navigator::{Navigator, NavigatorBuilder};
pub use params::{
    GenerateRoadmap, Id, ListInteractions, MoveRoadmap, RegenerateTask, ReorderRoadmaps,
    SaveRoadmap, TaskAction, TaskPointer,
};
pub use tree::{TaskRef, TaskSelector};
