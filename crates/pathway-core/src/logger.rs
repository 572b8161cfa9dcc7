//! Best-effort interaction logging.
//!
//! An [`InteractionSink`] stores events; the [`InteractionLogger`] in front
//! of it never lets a storage failure reach the caller.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::task;

use crate::{
    db::Database,
    error::{Result, RoadmapError},
    models::InteractionEvent,
};

/// Destination for interaction events.
#[async_trait]
pub trait InteractionSink: Send + Sync {
    /// Stores one event and returns its storage id.
    async fn record(&self, event: &InteractionEvent) -> Result<u64>;
}

/// Sink that appends events to the navigator's SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteInteractionSink {
    db_path: PathBuf,
    user_id: u64,
}

impl SqliteInteractionSink {
    pub fn new(db_path: impl Into<PathBuf>, user_id: u64) -> Self {
        Self {
            db_path: db_path.into(),
            user_id,
        }
    }
}

#[async_trait]
impl InteractionSink for SqliteInteractionSink {
    async fn record(&self, event: &InteractionEvent) -> Result<u64> {
        let db_path = self.db_path.clone();
        let user_id = self.user_id;
        let event = event.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_interaction(user_id, &event)
        })
        .await
        .map_err(RoadmapError::join)?
        .map_err(|e| RoadmapError::InteractionLog {
            message: e.to_string(),
        })
    }
}

/// Fire-and-forget front for an [`InteractionSink`].
#[derive(Clone)]
pub struct InteractionLogger {
    sink: Arc<dyn InteractionSink>,
}

impl InteractionLogger {
    pub fn new(sink: Arc<dyn InteractionSink>) -> Self {
        Self { sink }
    }

    /// Records `event`, returning its id, or `None` when the sink failed.
    ///
    /// Failures are logged and dropped here; they never propagate.
    pub async fn record(&self, event: &InteractionEvent) -> Option<u64> {
        match self.sink.record(event).await {
            Ok(id) => {
                debug!(
                    "Recorded {} on '{}' as event {id}",
                    event.action_type.as_str(),
                    event.task_identity
                );
                Some(id)
            }
            Err(e) => {
                warn!(
                    "Dropping {} event for task '{}': {e}",
                    event.action_type.as_str(),
                    event.task_identity
                );
                None
            }
        }
    }
}

#[cfg(test)]
pub use fake::FakeInteractionSink;
