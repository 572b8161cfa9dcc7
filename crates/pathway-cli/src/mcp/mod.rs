//! MCP server implementation for Pathway
//!
//! Exposes the navigator's operations as MCP tools so an AI assistant can
//! generate roadmaps, manage the saved slots and report task progress.
//! Tool parameters are the core parameter types; results are the markdown
//! produced by the core display types.

use std::future::Future;

use anyhow::Result;
use log::{debug, error, info};
use pathway_core::{
    params::{
        GenerateRoadmap, Id, ListInteractions, MoveRoadmap, RegenerateTask, ReorderRoadmaps,
        SaveRoadmap, TaskAction,
    },
    CreateResult, DeleteResult, Navigator, OperationStatus, RegenerationState,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;

use errors::to_mcp_error;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// MCP server for Pathway
///
/// Clones share one navigator, so a regeneration started by one request
/// blocks a second regeneration of the same roadmap from another.
#[derive(Clone)]
pub struct PathwayMcpServer {
    navigator: Navigator,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PathwayMcpServer {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "generate_roadmap",
        description = "Generate a new learning roadmap. Provide job_id to build it for a job posting, or target_career for a career; an optional title overrides the generated one. The roadmap is NOT saved: the result ends with its content as JSON, which can be passed to save_roadmap as roadmap_data."
    )]
    async fn generate_roadmap(&self, Parameters(params): Parameters<GenerateRoadmap>) -> McpResult {
        debug!("generate_roadmap: {params:?}");

        let roadmap = self
            .navigator
            .generate_roadmap(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to generate roadmap", &e))?;
        let data = serde_json::to_string_pretty(&roadmap.data()).map_err(|e| {
            ErrorData::internal_error(format!("Failed to encode roadmap: {e}"), None)
        })?;

        text_result(format!("{roadmap}\n```json\n{data}\n```\n"))
    }

    #[tool(
        name = "save_roadmap",
        description = "Save a roadmap into one of the user's 3 slots. Requires roadmap_data ({role_summary, gap_analysis, roadmap: {phases}}) and a title; job_id, roadmap_type ('job' or 'career') and target_career are optional. Fails when all 3 slots are taken: nothing is evicted, delete a roadmap first."
    )]
    async fn save_roadmap(&self, Parameters(params): Parameters<SaveRoadmap>) -> McpResult {
        debug!("save_roadmap: {}", params.title);

        let slot = self
            .navigator
            .save_roadmap(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to save roadmap", &e))?;

        text_result(CreateResult::new(slot).to_string())
    }

    #[tool(
        name = "list_roadmaps",
        description = "List the saved roadmaps in the user's order, with their IDs, slot numbers, type and size."
    )]
    async fn list_roadmaps(&self) -> McpResult {
        let saved = self
            .navigator
            .list_saved()
            .await
            .map_err(|e| to_mcp_error("Failed to list roadmaps", &e))?;

        text_result(saved.to_string())
    }

    #[tool(
        name = "show_roadmap",
        description = "Display a saved roadmap with every phase and task. Task ids are shown in backticks; use them (or the title for tasks without an id) with task_action and regenerate_task."
    )]
    async fn show_roadmap(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_roadmap: {params:?}");

        let slot = self
            .navigator
            .view_roadmap(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to show roadmap", &e))?;

        text_result(slot.roadmap.to_string())
    }

    #[tool(
        name = "delete_roadmap",
        description = "Delete a saved roadmap and free its slot. Deleting a roadmap that no longer exists succeeds and says so."
    )]
    async fn delete_roadmap(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_roadmap: {params:?}");

        let removed = self
            .navigator
            .delete_roadmap(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete roadmap", &e))?;

        text_result(DeleteResult::new(params.id, removed).to_string())
    }

    #[tool(
        name = "reorder_roadmaps",
        description = "Swap the positions of two saved roadmaps. Every other roadmap keeps its position. Returns the list in its new order."
    )]
    async fn reorder_roadmaps(&self, Parameters(params): Parameters<ReorderRoadmaps>) -> McpResult {
        debug!("reorder_roadmaps: {params:?}");

        let saved = self
            .navigator
            .reorder_roadmaps(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to reorder roadmaps", &e))?;

        text_result(saved.to_string())
    }

    #[tool(
        name = "move_roadmap",
        description = "Move a saved roadmap one slot 'up' or 'down'. Moving past either end leaves the order unchanged. Returns the list in its new order."
    )]
    async fn move_roadmap(&self, Parameters(params): Parameters<MoveRoadmap>) -> McpResult {
        debug!("move_roadmap: {params:?}");

        let saved = self
            .navigator
            .move_roadmap(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to move roadmap", &e))?;

        text_result(saved.to_string())
    }

    #[tool(
        name = "task_action",
        description = "Record what the learner did with a task: action is 'start', 'complete', 'skip' or 'rate_difficulty' (then rating 1-5 is required). Identify the task by its id, or by title when it has none; pass phase_index and task_index to pick one of several tasks with the same title. A 'skip' also replaces the task with a newly generated one. Failing to record the interaction never fails the action."
    )]
    async fn task_action(&self, Parameters(params): Parameters<TaskAction>) -> McpResult {
        debug!("task_action: {params:?}");

        let outcome = self
            .navigator
            .handle_task_action(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to handle task action", &e))?;

        text_result(outcome.to_string())
    }

    #[tool(
        name = "regenerate_task",
        description = "Replace one task of a saved roadmap with newly generated content. feedback_type is 'skip' (default), 'too_hard' or 'completed'; an optional rating 1-5 is passed to the generator. Only one regeneration runs per roadmap at a time; a second request while one is running is rejected and should be retried later."
    )]
    async fn regenerate_task(&self, Parameters(params): Parameters<RegenerateTask>) -> McpResult {
        debug!("regenerate_task: {params:?}");

        let regeneration = self
            .navigator
            .regenerate_task(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to regenerate task", &e))?;

        text_result(regeneration.to_string())
    }

    #[tool(
        name = "regeneration_status",
        description = "Tell whether a task of the given roadmap is being regenerated right now, and which one."
    )]
    async fn regeneration_status(&self, Parameters(params): Parameters<Id>) -> McpResult {
        let status = match self.navigator.regeneration_state(params.id) {
            RegenerationState::Idle => OperationStatus::success(format!(
                "No regeneration running for roadmap {}",
                params.id
            )),
            RegenerationState::Regenerating(identity) => OperationStatus::success(format!(
                "Task '{identity}' of roadmap {} is being regenerated",
                params.id
            )),
        };

        text_result(status.to_string())
    }

    #[tool(
        name = "list_interactions",
        description = "Show the recorded task interactions, oldest first, optionally only those for one roadmap_id."
    )]
    async fn list_interactions(
        &self,
        Parameters(params): Parameters<ListInteractions>,
    ) -> McpResult {
        let history = self
            .navigator
            .list_interactions(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to list interactions", &e))?;

        text_result(history.to_string())
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PathwayMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "pathway".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Pathway keeps adaptive learning roadmaps: phases of tasks leading to a job or a career.

## Core Concepts
- **Roadmap**: phases of tasks, generated for a job posting or a career
- **Slots**: each user keeps at most 3 saved roadmaps, in an order they choose
- **Task identity**: a task's id, or its title when it has none

## Workflow
1. `generate_roadmap` for a job or career, then `save_roadmap` with the returned JSON
2. `show_roadmap` to see the tasks and their ids
3. Report progress with `task_action` (start, complete, skip, rate_difficulty)
4. A skipped task is replaced automatically; use `regenerate_task` to replace one for another reason

## Slot Management
- `list_roadmaps`, `reorder_roadmaps`, `move_roadmap`, `delete_roadmap`
- Saving into full slots fails; delete a roadmap first"#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: PathwayMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Pathway MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
