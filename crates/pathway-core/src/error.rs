//! Error types for the roadmap library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all roadmap operations.
#[derive(Error, Debug)]
pub enum RoadmapError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Saved roadmap not found for the given ID
    #[error("Roadmap with ID {id} not found")]
    RoadmapNotFound { id: u64 },
    /// No task in the roadmap answers to the given identity
    #[error("Task '{identity}' not found in roadmap")]
    TaskNotFound { identity: String },
    /// Save attempted while every slot is occupied
    #[error("Saved roadmap limit reached ({limit}); delete a roadmap before saving another")]
    Capacity { limit: usize },
    /// The external content generator failed or timed out
    #[error("Content generation failed: {message}")]
    Generation { message: String },
    /// A regeneration is already running for this roadmap
    #[error("Task '{identity}' of roadmap {roadmap_id} is already being regenerated")]
    RegenerationInFlight { roadmap_id: u64, identity: String },
    /// The stored roadmap changed underneath a regeneration
    #[error("Roadmap with ID {id} changed while a task was being regenerated")]
    StaleRoadmap { id: u64 },
    /// Interaction logging failed. Never propagated past the logger.
    #[error("Interaction log error: {message}")]
    InteractionLog { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> RoadmapError {
        RoadmapError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> RoadmapError {
        RoadmapError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl RoadmapError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::database(message).with_source(source)
    }

    /// Creates a generation error from any displayable cause.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// Whether the failure leaves the request terminal but the roadmap
    /// untouched (not found, generation, concurrency).
    pub fn is_user_reportable(&self) -> bool {
        matches!(
            self,
            Self::RoadmapNotFound { .. }
                | Self::TaskNotFound { .. }
                | Self::Capacity { .. }
                | Self::Generation { .. }
                | Self::RegenerationInFlight { .. }
                | Self::StaleRoadmap { .. }
                | Self::InvalidInput { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| RoadmapError::database(message).with_source(e))
    }
}

/// Result type alias for roadmap operations
pub type Result<T> = std::result::Result<T, RoadmapError>;
