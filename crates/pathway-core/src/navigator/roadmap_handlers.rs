//! Roadmap lifecycle operations: generate, save, view, list, reorder and
//! delete.

use log::info;

use super::Navigator;
use crate::{
    display::SavedRoadmaps,
    error::{Result, RoadmapError},
    models::{Roadmap, RoadmapHeader, SavedRoadmapSlot},
    params::{GenerateRoadmap, Id, MoveRoadmap, ReorderRoadmaps, SaveRoadmap},
};

impl Navigator {
    /// Generates a new, unsaved roadmap.
    ///
    /// The content comes from the external generator and must pass shape
    /// validation. The title is, in order of preference, the requested
    /// title, the role title in the generated summary, or one derived from
    /// the target.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use pathway_core::{params::GenerateRoadmap, NavigatorBuilder};
    /// # async {
    /// let navigator = NavigatorBuilder::new().build().await?;
    /// let roadmap = navigator
    ///     .generate_roadmap(&GenerateRoadmap {
    ///         job_id: Some(12),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// assert!(roadmap.is_ephemeral());
    /// # Result::<(), pathway_core::RoadmapError>::Ok(())
    /// # };
    /// ```
    pub async fn generate_roadmap(&self, params: &GenerateRoadmap) -> Result<Roadmap> {
        let target = params.target()?;
        info!("Generating roadmap for {target:?}");

        let data = self
            .within_timeout("Roadmap generation", self.generator.generate_roadmap(&target))
            .await?;
        data.validate_shape().map_err(|reason| {
            RoadmapError::generation(format!("generator returned an unusable roadmap: {reason}"))
        })?;

        let title = params
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .or_else(|| data.suggested_title())
            .map(String::from)
            .unwrap_or_else(|| target.fallback_title());

        let header = RoadmapHeader {
            title,
            target_career: params
                .target_career
                .clone()
                .or_else(|| target.career().map(String::from)),
            roadmap_type: target.roadmap_type(),
            job_id: target.job_id(),
        };

        Ok(Roadmap::ephemeral(header, data))
    }

    /// Saves a roadmap received over an interface.
    ///
    /// Fails with [`RoadmapError::Capacity`] when every slot is taken.
    pub async fn save_roadmap(&self, params: &SaveRoadmap) -> Result<SavedRoadmapSlot> {
        let data = params.data()?;
        let header = RoadmapHeader {
            title: params.title.trim().to_string(),
            target_career: params.target_career.clone(),
            roadmap_type: params.roadmap_type,
            job_id: params.job_id,
        };

        self.save_slot(Roadmap::ephemeral(header, data)).await
    }

    /// Saves a roadmap produced by [`Navigator::generate_roadmap`].
    pub async fn save_generated(&self, roadmap: &Roadmap) -> Result<SavedRoadmapSlot> {
        self.save_slot(roadmap.clone()).await
    }

    /// Loads a saved roadmap, failing with [`RoadmapError::RoadmapNotFound`]
    /// when it does not exist.
    pub async fn view_roadmap(&self, params: &Id) -> Result<SavedRoadmapSlot> {
        self.get_slot(params.id)
            .await?
            .ok_or(RoadmapError::RoadmapNotFound { id: params.id })
    }

    /// Lists the saved roadmaps in display order.
    pub async fn list_saved(&self) -> Result<SavedRoadmaps> {
        Ok(SavedRoadmaps(self.list_slots().await?))
    }

    /// Deletes a saved roadmap.
    ///
    /// Deleting an id that does not exist is not an error; the result is
    /// `None` in that case.
    pub async fn delete_roadmap(&self, params: &Id) -> Result<Option<SavedRoadmapSlot>> {
        let removed = self.delete_slot(params.id).await?;
        if removed.is_some() {
            info!("Deleted roadmap {}", params.id);
        }
        Ok(removed)
    }

    /// Exchanges the positions of two saved roadmaps and returns the
    /// reordered list.
    pub async fn reorder_roadmaps(&self, params: &ReorderRoadmaps) -> Result<SavedRoadmaps> {
        self.swap_slots(params.first_id, params.second_id).await?;
        self.list_saved().await
    }

    /// Moves a saved roadmap one position and returns the reordered list.
    ///
    /// Moving the first roadmap up or the last one down leaves the list
    /// unchanged.
    pub async fn move_roadmap(&self, params: &MoveRoadmap) -> Result<SavedRoadmaps> {
        self.move_slot(params.id, params.direction).await?;
        self.list_saved().await
    }
}
