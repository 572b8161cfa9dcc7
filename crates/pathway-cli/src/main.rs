//! Pathway CLI Application
//!
//! Command-line interface and MCP server for adaptive learning roadmaps.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, PathwayMcpServer};
use pathway_core::{generator::CommandGenerator, NavigatorBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        no_color,
        generator_command,
        generator_args,
        generator_timeout,
        command,
    } = Args::parse();

    let mut builder = NavigatorBuilder::new()
        .with_database_path(database_file)
        .with_user_id(user)
        .with_generation_timeout(Duration::from_secs(generator_timeout));
    if let Some(program) = generator_command {
        builder = builder.with_generator(CommandGenerator::new(program).with_args(generator_args));
    }
    let navigator = builder
        .build()
        .await
        .context("Failed to initialize navigator")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Pathway started for user {user}");

    match command {
        Some(Generate(args)) => Cli::new(navigator, renderer).generate(args).await,
        Some(Roadmap { command }) => {
            Cli::new(navigator, renderer)
                .handle_roadmap_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(navigator, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Pathway MCP server");
            run_stdio_server(PathwayMcpServer::new(navigator))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(navigator, renderer).list_roadmaps().await,
    }
}
