//! Task identity resolution.

use log::warn;

use super::{TaskRef, TaskSelector};
use crate::{
    error::{RoadmapError, Result},
    models::Roadmap,
};

/// Finds the task `selector` refers to.
///
/// A position hint wins when the task there answers to the identity.
/// Otherwise phases are scanned in order, then tasks in order, and the first
/// match wins. Fails with [`RoadmapError::TaskNotFound`] when nothing
/// matches.
pub fn resolve(roadmap: &Roadmap, selector: &TaskSelector) -> Result<TaskRef> {
    if let Some(hint) = selector.position {
        let hinted = roadmap
            .phases
            .get(hint.phase)
            .and_then(|phase| phase.tasks.get(hint.task));
        if hinted.is_some_and(|task| task.answers_to(&selector.identity)) {
            return Ok(hint);
        }
    }

    let mut matches = resolve_all(roadmap, &selector.identity).into_iter();
    let first = matches.next().ok_or_else(|| RoadmapError::TaskNotFound {
        identity: selector.identity.clone(),
    })?;

    let others = matches.count();
    if others > 0 {
        warn!(
            "Identity '{}' matches {} tasks in roadmap {:?}; using {first}",
            selector.identity,
            others + 1,
            roadmap.id
        );
    }

    Ok(first)
}

/// Every location whose task answers to `identity`, in scan order.
pub fn resolve_all(roadmap: &Roadmap, identity: &str) -> Vec<TaskRef> {
    roadmap
        .phases
        .iter()
        .enumerate()
        .flat_map(|(phase_index, phase)| {
            phase
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| task.answers_to(identity))
                .map(move |(task_index, _)| TaskRef::new(phase_index, task_index))
        })
        .collect()
}
