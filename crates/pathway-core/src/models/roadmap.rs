//! Roadmap aggregate and its persisted JSON shape.

use std::{collections::HashMap, str::FromStr, sync::Arc};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Phase;

/// Whether a roadmap targets a job posting or a career.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum RoadmapType {
    /// Built against a specific job posting
    Job,

    /// Built against a free-text career goal
    #[default]
    Career,
}

impl FromStr for RoadmapType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "job" => Ok(RoadmapType::Job),
            "career" => Ok(RoadmapType::Career),
            _ => Err(format!("Invalid roadmap type: {s}")),
        }
    }
}

impl RoadmapType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadmapType::Job => "job",
            RoadmapType::Career => "career",
        }
    }
}

/// The full learning plan for a target job or career.
///
/// `id` is `None` while the roadmap is ephemeral (generated but unsaved).
/// `revision` increases by one every time a task is replaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Roadmap {
    /// Identifier assigned on first successful save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display title
    pub title: String,

    /// Career the roadmap leads to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_career: Option<String>,

    /// Job or career roadmap
    #[serde(default)]
    pub roadmap_type: RoadmapType,

    /// Back-reference to the job posting, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<u64>,

    /// Role description payload, opaque to this crate
    #[serde(default)]
    pub role_summary: Value,

    /// Missing skills payload, opaque to this crate
    #[serde(default)]
    pub gap_analysis: Value,

    /// Ordered phases
    #[serde(default)]
    pub phases: Vec<Arc<Phase>>,

    /// Other top-level generator fields, preserved verbatim
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,

    /// Fields of the `roadmap` object besides `phases`, preserved verbatim
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub roadmap_extra: Map<String, Value>,

    /// Content version, bumped on every task replacement
    #[serde(default)]
    pub revision: u64,

    /// Timestamp when the roadmap was created (UTC)
    pub created_at: Timestamp,
}

/// Persisted and wire shape of a roadmap's content:
/// `{role_summary, gap_analysis, roadmap: {phases}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoadmapData {
    #[serde(default)]
    pub role_summary: Value,
    #[serde(default)]
    pub gap_analysis: Value,
    #[serde(default)]
    pub roadmap: PhaseList,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `roadmap` member of [`RoadmapData`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhaseList {
    #[serde(default)]
    pub phases: Vec<Arc<Phase>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Descriptive fields that travel alongside [`RoadmapData`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadmapHeader {
    pub title: String,
    pub target_career: Option<String>,
    pub roadmap_type: RoadmapType,
    pub job_id: Option<u64>,
}

impl Roadmap {
    /// Builds an unsaved roadmap from generated content.
    pub fn ephemeral(header: RoadmapHeader, data: RoadmapData) -> Self {
        Self {
            id: None,
            title: header.title,
            target_career: header.target_career,
            roadmap_type: header.roadmap_type,
            job_id: header.job_id,
            role_summary: data.role_summary,
            gap_analysis: data.gap_analysis,
            phases: data.roadmap.phases,
            extra: data.extra,
            roadmap_extra: data.roadmap.extra,
            revision: 0,
            created_at: Timestamp::now(),
        }
    }

    /// Whether the roadmap has not been saved yet.
    pub fn is_ephemeral(&self) -> bool {
        self.id.is_none()
    }

    /// The content in its persisted shape. Phases are shared, not copied.
    pub fn data(&self) -> RoadmapData {
        RoadmapData {
            role_summary: self.role_summary.clone(),
            gap_analysis: self.gap_analysis.clone(),
            roadmap: PhaseList {
                phases: self.phases.clone(),
                extra: self.roadmap_extra.clone(),
            },
            extra: self.extra.clone(),
        }
    }

    /// Total number of tasks across all phases.
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(|phase| phase.tasks.len()).sum()
    }

    /// Identities shared by more than one task, in first-seen order.
    ///
    /// Resolution of such an identity without a position hint always lands
    /// on the first occurrence.
    pub fn ambiguous_identities(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for task in self.phases.iter().flat_map(|phase| phase.tasks.iter()) {
            let count = counts.entry(task.identity()).or_insert(0);
            if *count == 0 {
                order.push(task.identity());
            }
            *count += 1;
        }
        order
            .into_iter()
            .filter(|identity| counts.get(identity).copied().unwrap_or(0) > 1)
            .map(String::from)
            .collect()
    }
}

impl RoadmapData {
    /// Checks the minimum shape the core relies on: at least one phase and
    /// a non-empty title on every task.
    pub fn validate_shape(&self) -> Result<(), String> {
        if self.roadmap.phases.is_empty() {
            return Err("roadmap has no phases".to_string());
        }
        for (phase_index, phase) in self.roadmap.phases.iter().enumerate() {
            for (task_index, task) in phase.tasks.iter().enumerate() {
                if task.title.trim().is_empty() {
                    return Err(format!(
                        "task {task_index} of phase {phase_index} has no title"
                    ));
                }
            }
        }
        Ok(())
    }

    /// Title suggested by the role summary, if it carries one.
    pub fn suggested_title(&self) -> Option<&str> {
        self.role_summary
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.trim().is_empty())
    }
}
