//! Task actions and regeneration.
//!
//! Every action is logged first. A `skip` additionally regenerates the task;
//! the log write and the regeneration run side by side, and a failed log
//! write never stops the regeneration.

use std::sync::Arc;

use log::info;

use super::Navigator;
use crate::{
    display::Interactions,
    error::{Result, RoadmapError},
    gate::RegenerationState,
    generator::TaskRegenerationRequest,
    models::{
        ActionType, DifficultyRating, FeedbackType, InteractionEvent, Regeneration,
        SavedRoadmapSlot, TaskActionOutcome,
    },
    params::{ListInteractions, RegenerateTask, TaskAction},
    tree::{self, TaskRef, TaskSelector},
};

impl Navigator {
    /// Replaces one task of a saved roadmap with generated content.
    ///
    /// At most one regeneration runs per roadmap; a second request while one
    /// is in flight fails with [`RoadmapError::RegenerationInFlight`]. On
    /// any failure the stored roadmap is left as it was.
    pub async fn regenerate_task(&self, params: &RegenerateTask) -> Result<Regeneration> {
        let selector = params.pointer.selector()?;
        let rating = params.rating()?;
        self.regenerate(params.roadmap_id, selector, params.feedback_type, rating)
            .await
    }

    pub(crate) async fn regenerate(
        &self,
        roadmap_id: u64,
        selector: TaskSelector,
        feedback_type: FeedbackType,
        rating: Option<DifficultyRating>,
    ) -> Result<Regeneration> {
        // Taken before the first await and held until every exit.
        let _guard = self.gate.try_acquire(roadmap_id, &selector.identity)?;
        info!(
            "Regenerating task '{}' of roadmap {roadmap_id} ({})",
            selector.identity,
            feedback_type.as_str()
        );

        let (slot, at) = self.locate(roadmap_id, &selector).await?;
        let base = slot.roadmap;
        let previous_task = Arc::clone(&base.phases[at.phase].tasks[at.task]);

        let request = TaskRegenerationRequest {
            roadmap_id,
            task_identity: selector.identity.clone(),
            feedback_type,
            difficulty_rating: rating,
            job_id: base.job_id,
            target_career: base.target_career.clone(),
            current_task: Arc::clone(&previous_task),
        };
        let response = self
            .within_timeout("Task regeneration", self.generator.regenerate_task(&request))
            .await?;
        if response.new_task.title.trim().is_empty() {
            return Err(RoadmapError::generation(
                "generator returned a task without a title",
            ));
        }

        let updated = tree::replace_task(&base, at, response.new_task)?;
        self.store_content(updated.clone(), base.revision).await?;

        info!(
            "Replaced '{}' with '{}' in roadmap {roadmap_id} at {at}",
            previous_task.title, updated.phases[at.phase].tasks[at.task].title
        );

        Ok(Regeneration {
            new_task: Arc::clone(&updated.phases[at.phase].tasks[at.task]),
            roadmap: updated,
            replaced_at: at,
            feedback_type,
            previous_task,
        })
    }

    /// Handles one user action on a task of a saved roadmap.
    ///
    /// The interaction event is always attempted first, even when the task
    /// cannot be found. `skip` then regenerates the task with feedback
    /// `skip`; its errors are returned, log errors never are.
    pub async fn handle_task_action(&self, params: &TaskAction) -> Result<TaskActionOutcome> {
        let selector = params.pointer.selector()?;
        let rating = params.rating()?;

        let located = self.locate(params.roadmap_id, &selector).await;
        let event = match &located {
            Ok((slot, at)) => {
                let task = &slot.roadmap.phases[at.phase].tasks[at.task];
                InteractionEvent::for_task(task, params.action, rating)
                    .in_roadmap(Some(params.roadmap_id), slot.roadmap.job_id)
            }
            Err(_) => InteractionEvent::for_identity(&selector.identity, params.action, rating)
                .in_roadmap(Some(params.roadmap_id), None),
        }
        .with_duration(params.duration_seconds);

        let at = match located {
            Ok((_, at)) => at,
            Err(e) => {
                self.logger.record(&event).await;
                return Err(e);
            }
        };

        let mut outcome = TaskActionOutcome {
            action: params.action,
            task_identity: event.task_identity.clone(),
            event_id: None,
            regeneration: None,
        };

        if params.action == ActionType::Skip {
            // Pin the resolved position so the regeneration hits the same task.
            let selector = selector.at(at);
            let (event_id, regeneration) = tokio::join!(
                self.logger.record(&event),
                self.regenerate(params.roadmap_id, selector, FeedbackType::Skip, None)
            );
            outcome.event_id = event_id;
            outcome.regeneration = Some(regeneration?);
        } else {
            outcome.event_id = self.logger.record(&event).await;
        }

        Ok(outcome)
    }

    /// Whether a regeneration is running for `roadmap_id`, and for which
    /// task.
    pub fn regeneration_state(&self, roadmap_id: u64) -> RegenerationState {
        self.gate.state(roadmap_id)
    }

    /// Reads back the interaction log in recording order.
    pub async fn list_interactions(&self, params: &ListInteractions) -> Result<Interactions> {
        Ok(Interactions(self.list_events(params.roadmap_id).await?))
    }

    async fn locate(
        &self,
        roadmap_id: u64,
        selector: &TaskSelector,
    ) -> Result<(SavedRoadmapSlot, TaskRef)> {
        let slot = self
            .get_slot(roadmap_id)
            .await?
            .ok_or(RoadmapError::RoadmapNotFound { id: roadmap_id })?;
        let at = tree::resolve(&slot.roadmap, selector)?;
        Ok((slot, at))
    }
}
