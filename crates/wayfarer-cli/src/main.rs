//! Wayfarer CLI Application
//!
//! Command-line front end for generating an Irish travel itinerary and
//! chatting about it.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use wayfarer_core::TravelClientBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        base_url,
        store_file,
        submit_timeout,
        chat_timeout,
        no_color,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    // Catalogue listing needs neither the service nor the store
    if let Some(Options) = command {
        return cli::show_options(&renderer);
    }

    let client = TravelClientBuilder::new()
        .with_base_url(base_url)
        .with_store_path(store_file)
        .with_submit_timeout(submit_timeout.map(Duration::from_secs))
        .with_chat_timeout(chat_timeout.map(Duration::from_secs))
        .build()
        .await
        .context("Failed to initialize travel client")?;

    info!("Wayfarer started");

    let cli = Cli::new(client, renderer);
    match command {
        Some(Plan(args)) => cli.plan(args).await,
        Some(Chat { message }) => cli.chat(None, message).await,
        Some(Health) => cli.health().await,
        Some(Reset) => cli.reset().await,
        Some(Options) => cli.options(),
        Some(Show) | None => cli.show().await,
    }
}
