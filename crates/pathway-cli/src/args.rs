use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{GenerateArgs, RoadmapCommands, TaskCommands};

/// Adaptive learning roadmaps from the command line
///
/// Pathway generates phased learning roadmaps towards a job or a career,
/// keeps up to three of them per user, and adapts them as tasks are started,
/// completed, skipped or rated. Skipping a task asks the content generator
/// for a replacement. The same operations are available to AI assistants
/// through the MCP server (`pathway serve`).
#[derive(Parser)]
#[command(version, about, name = "pathway")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/pathway/pathway.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// User whose saved roadmaps are used
    #[arg(long, global = true, default_value_t = 1)]
    pub user: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Program that generates roadmap and task content. It receives one
    /// JSON request on stdin and answers with one JSON document on stdout.
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub generator_command: Option<PathBuf>,

    /// Argument passed to the generator program (repeatable)
    #[arg(
        long = "generator-arg",
        global = true,
        value_name = "ARG",
        allow_hyphen_values = true
    )]
    pub generator_args: Vec<String>,

    /// Seconds to wait for the generator before giving up
    #[arg(long, global = true, default_value_t = 60, value_name = "SECONDS")]
    pub generator_timeout: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Pathway CLI
///
/// - `generate`: Ask the generator for a new roadmap
/// - `roadmap`: Manage the saved roadmap slots
/// - `task`: Record progress on tasks and regenerate them
/// - `serve`: Start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new roadmap for a job or a career
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Manage saved roadmaps
    #[command(alias = "r")]
    Roadmap {
        #[command(subcommand)]
        command: RoadmapCommands,
    },
    /// Act on tasks of a saved roadmap
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Start the MCP server
    Serve,
}
