//! Yatra CLI Application
//!
//! Command-line interface for the Srisailam pilgrim companion.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, YatraMcpServer};
use renderer::TerminalRenderer;
use yatra_core::{CompanionBuilder, Config};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        no_color,
        model,
        weather_policy,
        itinerary_schema,
        command,
    } = Args::parse();

    let mut config = Config::from_env().context("Failed to read configuration")?;
    if let Some(model) = model {
        config.generation.model = model;
    }
    if let Some(policy) = weather_policy {
        config.weather.policy = policy;
    }
    if let Some(schema) = itinerary_schema {
        config.itinerary_schema = schema;
    }

    let companion = CompanionBuilder::new(config)
        .build()
        .context("Failed to initialize companion")?;

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        Itinerary(args) => Cli::new(companion, renderer).itinerary(args).await,
        Alerts(args) => Cli::new(companion, renderer).alerts(args).await,
        Translate(args) => Cli::new(companion, renderer).translate(args).await,
        Ask(args) => Cli::new(companion, renderer).ask(args).await,
        Weather(args) => Cli::new(companion, renderer).weather(args).await,
        Emergency => {
            Cli::new(companion, renderer).emergency();
            Ok(())
        }
        Darshan(args) => {
            Cli::new(companion, renderer).darshan(args);
            Ok(())
        }
        Generate(args) => Cli::new(companion, renderer).generate(args).await,
        Schema(args) => Cli::new(companion, renderer).schema(args),
        Serve => {
            info!("Starting Yatra MCP server");
            run_stdio_server(YatraMcpServer::new(companion))
                .await
                .context("MCP server failed")
        }
    }
}
