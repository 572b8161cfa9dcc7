//! Command-line argument wrappers and their handlers.
//!
//! Every subcommand has a clap-only argument struct that converts into the
//! matching core parameter type, so the core stays free of clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Navigator
//! ```
//!
//! The [`Cli`] handler runs one command against a [`Navigator`] and renders
//! the markdown result through the [`TerminalRenderer`].

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Subcommand, ValueEnum};
use log::debug;
use pathway_core::{
    params::*, ActionType, CreateResult, DeleteResult, FeedbackType, MoveDirection, Navigator,
    RoadmapType, MAX_SAVED_ROADMAPS,
};

use crate::renderer::TerminalRenderer;

/// Generate a new roadmap
///
/// Exactly one of `--job` or `--career` selects what the roadmap leads to.
/// The roadmap is printed; `--save` stores it in a free slot and `--output`
/// writes its content as JSON for a later `roadmap save`.
#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["job", "career"])))]
pub struct GenerateArgs {
    /// Job posting to build the roadmap for
    #[arg(long)]
    pub job: Option<u64>,
    /// Career to build the roadmap towards
    #[arg(long)]
    pub career: Option<String>,
    /// Title for the roadmap instead of the generated one
    #[arg(short, long)]
    pub title: Option<String>,
    /// Save the roadmap right away
    #[arg(long)]
    pub save: bool,
    /// Write the roadmap content as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl From<&GenerateArgs> for GenerateRoadmap {
    fn from(val: &GenerateArgs) -> Self {
        GenerateRoadmap {
            job_id: val.job,
            target_career: val.career.clone(),
            title: val.title.clone(),
        }
    }
}

/// Save roadmap content from a JSON file
///
/// The file holds `{role_summary, gap_analysis, roadmap: {phases}}`, the
/// format written by `generate --output` and `roadmap show --json`.
#[derive(Args)]
pub struct SaveRoadmapArgs {
    /// JSON file with the roadmap content
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Title of the saved roadmap
    #[arg(short, long)]
    pub title: String,
    /// Job posting the roadmap was built for
    #[arg(long)]
    pub job: Option<u64>,
    /// Career the roadmap leads to
    #[arg(long)]
    pub career: Option<String>,
}

impl SaveRoadmapArgs {
    /// Reads the content file and builds the core parameters.
    pub fn into_params(self) -> Result<SaveRoadmap> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let roadmap_data = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", self.file.display()))?;

        Ok(SaveRoadmap {
            roadmap_data,
            title: self.title,
            roadmap_type: if self.job.is_some() {
                RoadmapType::Job
            } else {
                RoadmapType::Career
            },
            job_id: self.job,
            target_career: self.career,
        })
    }
}

/// Show a saved roadmap
#[derive(Args)]
pub struct ShowRoadmapArgs {
    /// ID of the saved roadmap
    pub id: u64,
    /// Print the roadmap content as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

/// Delete a saved roadmap
///
/// Frees its slot. Deleting a roadmap that is already gone is not an error.
#[derive(Args)]
pub struct DeleteRoadmapArgs {
    /// ID of the saved roadmap
    pub id: u64,
}

impl From<DeleteRoadmapArgs> for Id {
    fn from(val: DeleteRoadmapArgs) -> Self {
        Id { id: val.id }
    }
}

/// Swap the positions of two saved roadmaps
#[derive(Args)]
pub struct ReorderRoadmapsArgs {
    /// ID of the first roadmap
    pub first_id: u64,
    /// ID of the second roadmap
    pub second_id: u64,
}

impl From<ReorderRoadmapsArgs> for ReorderRoadmaps {
    fn from(val: ReorderRoadmapsArgs) -> Self {
        ReorderRoadmaps {
            first_id: val.first_id,
            second_id: val.second_id,
        }
    }
}

/// Move a saved roadmap one slot up or down
#[derive(Args)]
pub struct MoveRoadmapArgs {
    /// ID of the saved roadmap
    pub id: u64,
    /// Direction to move in
    #[arg(value_enum)]
    pub direction: DirectionArg,
}

impl From<MoveRoadmapArgs> for MoveRoadmap {
    fn from(val: MoveRoadmapArgs) -> Self {
        MoveRoadmap {
            id: val.id,
            direction: val.direction.into(),
        }
    }
}

#[derive(Subcommand)]
pub enum RoadmapCommands {
    /// List saved roadmaps in slot order
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a saved roadmap
    #[command(alias = "s")]
    Show(ShowRoadmapArgs),
    /// Save roadmap content from a JSON file
    Save(SaveRoadmapArgs),
    /// Delete a saved roadmap
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteRoadmapArgs),
    /// Swap the positions of two saved roadmaps
    #[command(alias = "sw")]
    Reorder(ReorderRoadmapsArgs),
    /// Move a saved roadmap one slot up or down
    #[command(alias = "mv")]
    Move(MoveRoadmapArgs),
}

/// Which task of which saved roadmap
#[derive(Args)]
pub struct TaskPointerArgs {
    /// ID of the saved roadmap
    pub roadmap_id: u64,
    /// Task id, or the title for tasks without an id
    pub task: String,
    /// 0-based phase of the task, to pick one of several tasks with the
    /// same title
    #[arg(long, requires = "task_index")]
    pub phase_index: Option<usize>,
    /// 0-based position of the task within its phase
    #[arg(long, requires = "phase_index")]
    pub task_index: Option<usize>,
}

impl From<TaskPointerArgs> for TaskPointer {
    fn from(val: TaskPointerArgs) -> Self {
        TaskPointer {
            task: val.task,
            phase_index: val.phase_index,
            task_index: val.task_index,
        }
    }
}

/// Record an action on a task
#[derive(Args)]
pub struct TaskEventArgs {
    #[command(flatten)]
    pub target: TaskPointerArgs,
    /// Seconds spent on the task
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<u32>,
}

impl TaskEventArgs {
    pub fn into_params(self, action: ActionType) -> TaskAction {
        TaskAction {
            roadmap_id: self.target.roadmap_id,
            pointer: self.target.into(),
            action,
            rating: None,
            duration_seconds: self.duration,
        }
    }
}

/// Rate how hard a task was
#[derive(Args)]
pub struct RateTaskArgs {
    #[command(flatten)]
    pub target: TaskPointerArgs,
    /// 1 (too hard) to 5 (too easy)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: u8,
    /// Seconds spent on the task
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<u32>,
}

impl From<RateTaskArgs> for TaskAction {
    fn from(val: RateTaskArgs) -> Self {
        TaskAction {
            roadmap_id: val.target.roadmap_id,
            pointer: val.target.into(),
            action: ActionType::RateDifficulty,
            rating: Some(val.rating),
            duration_seconds: val.duration,
        }
    }
}

/// Replace a task with newly generated content
#[derive(Args)]
pub struct RegenerateTaskArgs {
    #[command(flatten)]
    pub target: TaskPointerArgs,
    /// Why the task should be replaced
    #[arg(long, value_enum, default_value_t = FeedbackArg::Skip)]
    pub feedback: FeedbackArg,
    /// Difficulty rating to pass along, 1 (too hard) to 5 (too easy)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,
}

impl From<RegenerateTaskArgs> for RegenerateTask {
    fn from(val: RegenerateTaskArgs) -> Self {
        RegenerateTask {
            roadmap_id: val.target.roadmap_id,
            pointer: val.target.into(),
            feedback_type: val.feedback.into(),
            rating: val.rating,
        }
    }
}

/// Show recorded task interactions
#[derive(Args)]
pub struct HistoryArgs {
    /// Only show interactions with this roadmap
    #[arg(long)]
    pub roadmap: Option<u64>,
}

impl From<HistoryArgs> for ListInteractions {
    fn from(val: HistoryArgs) -> Self {
        ListInteractions {
            roadmap_id: val.roadmap,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Record that a task was started
    Start(TaskEventArgs),
    /// Record that a task was completed
    #[command(alias = "done")]
    Complete(TaskEventArgs),
    /// Skip a task; it is replaced with a generated one
    Skip(TaskEventArgs),
    /// Rate the difficulty of a task
    Rate(RateTaskArgs),
    /// Replace a task with newly generated content
    #[command(alias = "regen")]
    Regenerate(RegenerateTaskArgs),
    /// Show recorded task interactions
    #[command(alias = "log")]
    History(HistoryArgs),
}

/// Feedback values accepted by `task regenerate --feedback`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FeedbackArg {
    /// The learner skipped the task
    Skip,
    /// The task was too hard
    TooHard,
    /// The task was completed and a follow-up is wanted
    Completed,
}

impl From<FeedbackArg> for FeedbackType {
    fn from(val: FeedbackArg) -> Self {
        match val {
            FeedbackArg::Skip => FeedbackType::Skip,
            FeedbackArg::TooHard => FeedbackType::TooHard,
            FeedbackArg::Completed => FeedbackType::Completed,
        }
    }
}

/// Directions accepted by `roadmap move`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(val: DirectionArg) -> Self {
        match val {
            DirectionArg::Up => MoveDirection::Up,
            DirectionArg::Down => MoveDirection::Down,
        }
    }
}

/// Runs CLI commands against a navigator.
pub struct Cli {
    navigator: Navigator,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(navigator: Navigator, renderer: TerminalRenderer) -> Self {
        Self {
            navigator,
            renderer,
        }
    }

    pub async fn generate(&self, args: GenerateArgs) -> Result<()> {
        let roadmap = self
            .navigator
            .generate_roadmap(&GenerateRoadmap::from(&args))
            .await
            .context("Failed to generate roadmap")?;

        if let Some(path) = &args.output {
            let json = serde_json::to_string_pretty(&roadmap.data())?;
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Wrote roadmap content to {}", path.display());
        }

        if args.save {
            let slot = self
                .navigator
                .save_generated(&roadmap)
                .await
                .context("Failed to save roadmap")?;
            return self.renderer.render(&CreateResult::new(slot).to_string());
        }

        self.renderer.render(&roadmap.to_string())
    }

    pub async fn handle_roadmap_command(&self, command: RoadmapCommands) -> Result<()> {
        match command {
            RoadmapCommands::List => self.list_roadmaps().await,
            RoadmapCommands::Show(args) => self.show_roadmap(args).await,
            RoadmapCommands::Save(args) => {
                let slot = self
                    .navigator
                    .save_roadmap(&args.into_params()?)
                    .await
                    .context("Failed to save roadmap")?;
                self.renderer.render(&CreateResult::new(slot).to_string())
            }
            RoadmapCommands::Delete(args) => {
                let params = Id::from(args);
                let removed = self
                    .navigator
                    .delete_roadmap(&params)
                    .await
                    .context("Failed to delete roadmap")?;
                self.renderer
                    .render(&DeleteResult::new(params.id, removed).to_string())
            }
            RoadmapCommands::Reorder(args) => {
                let saved = self
                    .navigator
                    .reorder_roadmaps(&args.into())
                    .await
                    .context("Failed to reorder roadmaps")?;
                self.renderer.render(&saved.to_string())
            }
            RoadmapCommands::Move(args) => {
                let saved = self
                    .navigator
                    .move_roadmap(&args.into())
                    .await
                    .context("Failed to move roadmap")?;
                self.renderer.render(&saved.to_string())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        let params = match command {
            TaskCommands::Start(args) => args.into_params(ActionType::Start),
            TaskCommands::Complete(args) => args.into_params(ActionType::Complete),
            TaskCommands::Skip(args) => args.into_params(ActionType::Skip),
            TaskCommands::Rate(args) => args.into(),
            TaskCommands::Regenerate(args) => {
                let regeneration = self
                    .navigator
                    .regenerate_task(&args.into())
                    .await
                    .context("Failed to regenerate task")?;
                return self.renderer.render(&regeneration.to_string());
            }
            TaskCommands::History(args) => {
                let history = self
                    .navigator
                    .list_interactions(&args.into())
                    .await
                    .context("Failed to read interaction history")?;
                return self.renderer.render(&history.to_string());
            }
        };

        let outcome = self
            .navigator
            .handle_task_action(&params)
            .await
            .with_context(|| {
                format!("Failed to {} task '{}'", params.action, params.pointer.task)
            })?;
        self.renderer.render(&outcome.to_string())
    }

    pub async fn list_roadmaps(&self) -> Result<()> {
        let saved = self
            .navigator
            .list_saved()
            .await
            .context("Failed to list roadmaps")?;
        self.renderer.render(&saved.to_string())
    }

    async fn show_roadmap(&self, args: ShowRoadmapArgs) -> Result<()> {
        let slot = self
            .navigator
            .view_roadmap(&Id { id: args.id })
            .await
            .context("Failed to show roadmap")?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&slot.roadmap.data())?);
            return Ok(());
        }

        self.renderer.render(&format!(
            "{}\n_Slot {} of {MAX_SAVED_ROADMAPS}_\n",
            slot.roadmap,
            slot.position + 1
        ))
    }
}
