//! Seam to the external content generator.
//!
//! Roadmap and task content is produced outside this crate. The
//! [`ContentGenerator`] trait is the only way the navigator talks to it;
//! adapters decide how the call travels (subprocess, network, fake).

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::RoadmapError,
    models::{DifficultyRating, FeedbackType, RoadmapData, RoadmapType, Task},
};

mod command;
#[cfg(test)]
mod fake;

pub use command::CommandGenerator;
#[cfg(test)]
pub use fake::{FakeGenerator, GeneratorCall};

/// Errors from content generator adapters
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("no content generator configured")]
    Unconfigured,
    #[error("failed to run generator: {0}")]
    Spawn(String),
    #[error("generator exited with status {code}: {stderr}")]
    Failed { code: i32, stderr: String },
    #[error("malformed generator response: {0}")]
    Malformed(String),
    #[error("generator rejected the request: {0}")]
    Rejected(String),
}

impl From<GeneratorError> for RoadmapError {
    fn from(error: GeneratorError) -> Self {
        RoadmapError::generation(error.to_string())
    }
}

/// What a new roadmap should lead to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationTarget {
    /// A specific job posting
    Job { job_id: u64 },
    /// A free-text career goal
    Career { career: String },
}

impl GenerationTarget {
    pub fn roadmap_type(&self) -> RoadmapType {
        match self {
            Self::Job { .. } => RoadmapType::Job,
            Self::Career { .. } => RoadmapType::Career,
        }
    }

    pub fn job_id(&self) -> Option<u64> {
        match self {
            Self::Job { job_id } => Some(*job_id),
            Self::Career { .. } => None,
        }
    }

    pub fn career(&self) -> Option<&str> {
        match self {
            Self::Job { .. } => None,
            Self::Career { career } => Some(career),
        }
    }

    /// Title used when neither the caller nor the generated content
    /// supplies one.
    pub fn fallback_title(&self) -> String {
        match self {
            Self::Job { job_id } => format!("Roadmap for job {job_id}"),
            Self::Career { career } => format!("{career} Roadmap"),
        }
    }
}

/// Everything the generator is told about a task it should replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRegenerationRequest {
    pub roadmap_id: u64,
    /// Identity the caller used to select the task
    pub task_identity: String,
    pub feedback_type: FeedbackType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_rating: Option<DifficultyRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_career: Option<String>,
    /// The task as it is stored right now
    pub current_task: Arc<Task>,
}

/// Response to a task regeneration: `{new_task: Task}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegeneratedTask {
    pub new_task: Task,
}

/// External producer of roadmap and task content.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produces a complete roadmap for `target`.
    async fn generate_roadmap(
        &self,
        target: &GenerationTarget,
    ) -> Result<RoadmapData, GeneratorError>;

    /// Produces a replacement for one task.
    async fn regenerate_task(
        &self,
        request: &TaskRegenerationRequest,
    ) -> Result<RegeneratedTask, GeneratorError>;
}

/// Default generator: every call fails with [`GeneratorError::Unconfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerator;

#[async_trait]
impl ContentGenerator for UnconfiguredGenerator {
    async fn generate_roadmap(
        &self,
        _target: &GenerationTarget,
    ) -> Result<RoadmapData, GeneratorError> {
        Err(GeneratorError::Unconfigured)
    }

    async fn regenerate_task(
        &self,
        _request: &TaskRegenerationRequest,
    ) -> Result<RegeneratedTask, GeneratorError> {
        Err(GeneratorError::Unconfigured)
    }
}
