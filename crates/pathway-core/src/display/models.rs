//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns.
//!
//! Every implementation produces markdown for the terminal renderer and MCP
//! text responses.

use std::fmt;

use serde_json::Value;

use super::datetime::LocalDateTime;
use crate::{
    models::{
        ActionType, FeedbackType, InteractionEvent, Phase, Regeneration, Roadmap, RoadmapType,
        SavedRoadmapSlot, Task, TaskActionOutcome, MAX_SAVED_ROADMAPS,
    },
    tree::resolve_all,
};

impl fmt::Display for RoadmapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Roadmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => writeln!(f, "# {id}. {}", self.title)?,
            None => writeln!(f, "# {} (unsaved)", self.title)?,
        }
        writeln!(f)?;

        writeln!(f, "- Type: {}", self.roadmap_type)?;
        if let Some(career) = &self.target_career {
            writeln!(f, "- Target career: {career}")?;
        }
        if let Some(job_id) = self.job_id {
            writeln!(f, "- Job: {job_id}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if self.revision > 0 {
            writeln!(f, "- Revision: {}", self.revision)?;
        }

        if self.phases.is_empty() {
            return writeln!(f, "\nNo phases in this roadmap.");
        }

        write_duplicates(f, self)?;

        for (index, phase) in self.phases.iter().enumerate() {
            writeln!(f)?;
            write!(f, "## Phase {}: ", index + 1)?;
            write!(f, "{phase}")?;
        }

        Ok(())
    }
}

/// Lists identities shared by several tasks with the 0-based positions that
/// `phase_index`/`task_index` accept.
fn write_duplicates(f: &mut fmt::Formatter<'_>, roadmap: &Roadmap) -> fmt::Result {
    let duplicates = roadmap.ambiguous_identities();
    if duplicates.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(f, "**Duplicate task identities**")?;
    writeln!(f)?;
    writeln!(
        f,
        "Pass phase_index and task_index to pick one; otherwise the first match is used."
    )?;
    writeln!(f)?;
    for identity in duplicates {
        let positions = resolve_all(roadmap, &identity)
            .into_iter()
            .map(|at| format!("phase_index {} task_index {}", at.phase, at.task))
            .collect::<Vec<_>>()
            .join("; ");
        writeln!(f, "- `{identity}`: {positions}")?;
    }

    Ok(())
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phase_name)?;
        if let Some(weeks) = self.estimated_duration_weeks {
            write!(f, " ({weeks} weeks)")?;
        }
        writeln!(f)?;

        if !self.goal.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.goal)?;
        }

        for task in &self.tasks {
            writeln!(f)?;
            write!(f, "{task}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.explicit_id() {
            Some(id) => writeln!(f, "### {} `{id}`", self.title)?,
            None => writeln!(f, "### {}", self.title)?,
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        let lists = [
            ("Subtasks", &self.subtasks),
            ("Skills gained", &self.skills_gained),
            ("Covers", &self.jd_alignment),
        ];
        for (heading, items) in lists {
            if items.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "**{heading}**")?;
            writeln!(f)?;
            for item in items {
                writeln!(f, "- {item}")?;
            }
        }

        let recommendations = [
            ("Recommended courses", &self.recommended_courses),
            ("Recommended projects", &self.recommended_projects),
        ];
        for (heading, items) in recommendations {
            if items.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "**{heading}**")?;
            writeln!(f)?;
            for item in items {
                writeln!(f, "- {}", Recommendation(item))?;
            }
        }

        Ok(())
    }
}

/// One course or project suggestion.
///
/// Generators send either a plain string or an object; objects show their
/// `title` (or `name`), then `provider` and `url` when present.
struct Recommendation<'a>(&'a Value);

impl fmt::Display for Recommendation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Value::Object(fields) = self.0 else {
            return match self.0 {
                Value::String(text) => write!(f, "{text}"),
                other => write!(f, "{other}"),
            };
        };

        let text = |key: &str| fields.get(key).and_then(Value::as_str);
        match text("title").or_else(|| text("name")) {
            Some(title) => write!(f, "{title}")?,
            None => return write!(f, "{}", self.0),
        }
        if let Some(provider) = text("provider") {
            write!(f, " ({provider})")?;
        }
        if let Some(url) = text("url") {
            write!(f, " <{url}>")?;
        }
        Ok(())
    }
}

impl fmt::Display for SavedRoadmapSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roadmap = &self.roadmap;
        writeln!(
            f,
            "## {}. {} (ID: {})",
            self.position + 1,
            roadmap.title,
            self.id()
        )?;
        writeln!(f)?;

        writeln!(f, "- **Type**: {}", roadmap.roadmap_type)?;
        if let Some(career) = &roadmap.target_career {
            writeln!(f, "- **Target career**: {career}")?;
        }
        writeln!(
            f,
            "- **Content**: {} phases, {} tasks",
            roadmap.phases.len(),
            roadmap.task_count()
        )?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for InteractionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} **{}** on `{}`",
            LocalDateTime(&self.recorded_at),
            self.action_type,
            self.task_identity
        )?;
        if let Some(rating) = self.difficulty_rating {
            write!(f, " rated {rating}")?;
        }
        if let Some(seconds) = self.duration_seconds {
            write!(f, " after {seconds}s")?;
        }
        writeln!(f, " (reward {:+.1})", self.reward)
    }
}

impl fmt::Display for Regeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Replaced '{}' at {} ({} feedback) with:",
            self.previous_task.title, self.replaced_at, self.feedback_type
        )?;
        writeln!(f)?;
        write!(f, "{}", self.new_task)
    }
}

impl fmt::Display for TaskActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.logged() {
            writeln!(f, "Recorded {} on '{}'.", self.action, self.task_identity)?;
        } else {
            writeln!(
                f,
                "Handled {} on '{}' (the interaction could not be logged).",
                self.action, self.task_identity
            )?;
        }

        if let Some(regeneration) = &self.regeneration {
            writeln!(f)?;
            write!(f, "{regeneration}")?;
        }

        Ok(())
    }
}

/// Footer line for a saved list, e.g. `2/3 slots used`.
pub(crate) fn slots_used(count: usize) -> String {
    format!("{count}/{MAX_SAVED_ROADMAPS} slots used")
}
