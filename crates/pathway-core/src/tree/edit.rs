//! Copy-on-write task replacement.

use std::sync::Arc;

use super::TaskRef;
use crate::{
    error::{RoadmapError, Result},
    models::{Phase, Roadmap, Task},
};

/// Returns a new roadmap in which the task at `at` is `new_task`.
///
/// Only the path root -> phase -> task is rebuilt: the two `Arc` vectors on
/// that path are cloned (pointer copies) and every other phase and task is
/// shared with `roadmap`. Scalar and payload fields of the rebuilt root and
/// phase are copied once. Phase count, phase order and task order are
/// unchanged. The revision is bumped by one.
pub fn replace_task(roadmap: &Roadmap, at: TaskRef, new_task: Task) -> Result<Roadmap> {
    let phase = roadmap
        .phases
        .get(at.phase)
        .ok_or_else(|| out_of_range(roadmap, at))?;
    if at.task >= phase.tasks.len() {
        return Err(out_of_range(roadmap, at));
    }

    let mut tasks = phase.tasks.clone();
    tasks[at.task] = Arc::new(new_task);

    let new_phase = Phase {
        phase_id: phase.phase_id,
        phase_name: phase.phase_name.clone(),
        goal: phase.goal.clone(),
        estimated_duration_weeks: phase.estimated_duration_weeks,
        tasks,
        extra: phase.extra.clone(),
    };

    let mut phases = roadmap.phases.clone();
    phases[at.phase] = Arc::new(new_phase);

    Ok(Roadmap {
        id: roadmap.id,
        title: roadmap.title.clone(),
        target_career: roadmap.target_career.clone(),
        roadmap_type: roadmap.roadmap_type,
        job_id: roadmap.job_id,
        role_summary: roadmap.role_summary.clone(),
        gap_analysis: roadmap.gap_analysis.clone(),
        phases,
        extra: roadmap.extra.clone(),
        roadmap_extra: roadmap.roadmap_extra.clone(),
        revision: roadmap.revision + 1,
        created_at: roadmap.created_at,
    })
}

fn out_of_range(roadmap: &Roadmap, at: TaskRef) -> RoadmapError {
    RoadmapError::invalid_input("task_ref").with_reason(format!(
        "No task at {at}; roadmap has {} phases",
        roadmap.phases.len()
    ))
}
