//! Builder for creating and configuring Navigator instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use tokio::task;

use super::Navigator;
use crate::{
    db::Database,
    error::{Result, RoadmapError},
    gate::RegenerationGate,
    generator::{ContentGenerator, UnconfiguredGenerator},
    logger::{InteractionLogger, InteractionSink, SqliteInteractionSink},
};

/// Generation timeout used when none is configured.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// User whose collection is used when none is configured.
pub const DEFAULT_USER_ID: u64 = 1;

/// Builder for creating and configuring Navigator instances.
pub struct NavigatorBuilder {
    database_path: Option<PathBuf>,
    user_id: u64,
    generator: Option<Arc<dyn ContentGenerator>>,
    sink: Option<Arc<dyn InteractionSink>>,
    generation_timeout: Duration,
}

impl NavigatorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            user_id: DEFAULT_USER_ID,
            generator: None,
            sink: None,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/pathway/pathway.db` or
    /// `~/.local/share/pathway/pathway.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the user whose saved roadmaps are managed.
    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the external content generator.
    pub fn with_generator(mut self, generator: impl ContentGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Replaces the default SQLite interaction sink.
    pub fn with_interaction_sink(mut self, sink: impl InteractionSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Sets how long generator calls may take.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Builds the configured navigator instance.
    ///
    /// # Errors
    ///
    /// Returns `RoadmapError::FileSystem` if the database path is invalid
    /// Returns `RoadmapError::Database` if database initialization fails
    /// Returns `RoadmapError::Configuration` if the timeout is zero
    pub async fn build(self) -> Result<Navigator> {
        if self.generation_timeout.is_zero() {
            return Err(RoadmapError::Configuration {
                message: "Generation timeout must be greater than zero".to_string(),
            });
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RoadmapError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), RoadmapError>(())
        })
        .await
        .map_err(RoadmapError::join)??;

        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(SqliteInteractionSink::new(&db_path, self.user_id)));
        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(UnconfiguredGenerator));

        Ok(Navigator {
            db_path,
            user_id: self.user_id,
            generator,
            logger: InteractionLogger::new(sink),
            gate: RegenerationGate::new(),
            generation_timeout: self.generation_timeout,
        })
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("pathway")
            .place_data_file("pathway.db")
            .map_err(|e| RoadmapError::XdgDirectory(e.to_string()))
    }
}

impl Default for NavigatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
