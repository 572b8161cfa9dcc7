//! Single-flight regeneration state per roadmap.
//!
//! Each roadmap is either [`RegenerationState::Idle`] or
//! [`RegenerationState::Regenerating`] with the identity of the task being
//! replaced. Entering `Regenerating` fails when the roadmap is already
//! there; leaving it happens when the [`RegenerationGuard`] is dropped, on
//! every return path including errors and panics.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{RoadmapError, Result};

/// Regeneration state of one roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "task", rename_all = "snake_case")]
pub enum RegenerationState {
    /// No regeneration running
    Idle,
    /// The task with this identity is being regenerated
    Regenerating(String),
}

impl RegenerationState {
    /// Whether `identity` should be presented as locked.
    pub fn is_locking(&self, identity: &str) -> bool {
        matches!(self, Self::Regenerating(current) if current == identity)
    }
}

/// Shared table of roadmaps with a regeneration in flight.
///
/// Cloning is cheap and every clone sees the same table.
#[derive(Debug, Clone, Default)]
pub struct RegenerationGate {
    in_flight: Arc<Mutex<HashMap<u64, String>>>,
}

impl RegenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `roadmap_id` from `Idle` to `Regenerating(identity)`.
    ///
    /// Fails with [`RoadmapError::RegenerationInFlight`] naming the task
    /// already in progress.
    pub fn try_acquire(&self, roadmap_id: u64, identity: &str) -> Result<RegenerationGuard> {
        let mut in_flight = self.in_flight.lock();
        if let Some(current) = in_flight.get(&roadmap_id) {
            return Err(RoadmapError::RegenerationInFlight {
                roadmap_id,
                identity: current.clone(),
            });
        }
        in_flight.insert(roadmap_id, identity.to_string());

        Ok(RegenerationGuard {
            gate: self.clone(),
            roadmap_id,
        })
    }

    /// Current state of `roadmap_id`.
    pub fn state(&self, roadmap_id: u64) -> RegenerationState {
        match self.in_flight.lock().get(&roadmap_id) {
            Some(identity) => RegenerationState::Regenerating(identity.clone()),
            None => RegenerationState::Idle,
        }
    }

    fn release(&self, roadmap_id: u64) {
        self.in_flight.lock().remove(&roadmap_id);
    }
}

/// Holds a roadmap in `Regenerating`; dropping it returns the roadmap to
/// `Idle`.
#[derive(Debug)]
#[must_use = "the roadmap returns to Idle as soon as the guard is dropped"]
pub struct RegenerationGuard {
    gate: RegenerationGate,
    roadmap_id: u64,
}

impl Drop for RegenerationGuard {
    fn drop(&mut self) {
        self.gate.release(self.roadmap_id);
    }
}
