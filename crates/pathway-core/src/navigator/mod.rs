//! High-level navigator API for generating, saving and adapting roadmaps.
//!
//! The [`Navigator`] is the single entry point the interfaces (CLI, MCP)
//! talk to. It composes the storage layer, the task tree editor, the
//! regeneration gate, the interaction logger and the external content
//! generator.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers      │    │   Operations    │    │    Database     │
//! │ (roadmap_,       │───▶│ (roadmap_ops)   │───▶│   (via db/)     │
//! │  task_handlers)  │    │                 │    │                 │
//! └──────────────────┘    └─────────────────┘    └─────────────────┘
//!          │
//!          ├──▶ tree (resolve, replace_task)
//!          ├──▶ gate (single-flight per roadmap)
//!          ├──▶ logger (best-effort event log)
//!          └──▶ generator (external content)
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Navigator`] instances with configuration
//! - [`roadmap_handlers`]: generate, save, view, list, reorder, delete
//! - [`task_handlers`]: task actions, regeneration, interaction history
//! - [`roadmap_ops`]: `spawn_blocking` wrappers around the database
//!
//! # Usage
//!
//! ```rust,no_run
//! use pathway_core::{params::GenerateRoadmap, NavigatorBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let navigator = NavigatorBuilder::new()
//!     .with_database_path(Some("/tmp/pathway.db"))
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
//! println!("Saved as {}", slot.id());
//! # Ok(())
//! # }
//! ```

use std::{future::Future, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    error::{Result, RoadmapError},
    gate::RegenerationGate,
    generator::{ContentGenerator, GeneratorError},
    logger::InteractionLogger,
};

pub mod builder;
pub mod roadmap_handlers;
pub mod roadmap_ops;
pub mod task_handlers;

#[cfg(test)]
mod tests;

pub use builder::NavigatorBuilder;

/// Main navigator interface for one user's roadmaps.
///
/// Clones share the regeneration gate, so single-flight holds across every
/// clone of a navigator.
#[derive(Clone)]
pub struct Navigator {
    pub(crate) db_path: PathBuf,
    pub(crate) user_id: u64,
    pub(crate) generator: Arc<dyn ContentGenerator>,
    pub(crate) logger: InteractionLogger,
    pub(crate) gate: RegenerationGate,
    pub(crate) generation_timeout: Duration,
}

impl Navigator {
    /// Owner of the saved collection this navigator works on.
    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Path of the SQLite database.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Awaits a generator call under the configured timeout.
    ///
    /// A timeout is reported exactly like a generator failure. Dropping the
    /// call on timeout cancels it.
    pub(crate) async fn within_timeout<T, F>(&self, what: &str, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, GeneratorError>>,
    {
        match tokio::time::timeout(self.generation_timeout, call).await {
            Ok(result) => result.map_err(RoadmapError::from),
            Err(_) => Err(RoadmapError::generation(format!(
                "{what} timed out after {}s",
                self.generation_timeout.as_secs_f64()
            ))),
        }
    }
}
