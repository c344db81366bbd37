use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::PlanArgs;

/// Terminal travel planner for Ireland
///
/// Wayfarer sends your trip details to an itinerary service, keeps the
/// generated itinerary for the session and lets you chat with the travel
/// assistant about it.
#[derive(Parser)]
#[command(version, about, name = "wf")]
pub struct Args {
    /// Base URL of the itinerary service. Defaults to http://localhost:8000
    #[arg(long, global = true, env = "WAYFARER_API_URL")]
    pub base_url: Option<String>,

    /// Path to the session store file. Defaults to
    /// $XDG_DATA_HOME/wayfarer/session.db
    #[arg(long, global = true, env = "WAYFARER_STORE_FILE")]
    pub store_file: Option<PathBuf>,

    /// Seconds to wait for an itinerary before giving up (default 300)
    #[arg(long, global = true, value_name = "SECONDS", env = "WAYFARER_SUBMIT_TIMEOUT")]
    pub submit_timeout: Option<u64>,

    /// Seconds to wait for a chat reply before giving up (default 120)
    #[arg(long, global = true, value_name = "SECONDS", env = "WAYFARER_CHAT_TIMEOUT")]
    pub chat_timeout: Option<u64>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Wayfarer CLI
///
/// Running `wf` without a command shows the stored itinerary.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate an itinerary for a trip
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Chat about the current itinerary; without a message, start a session
    #[command(alias = "c")]
    Chat {
        /// Send a single message and exit
        message: Option<String>,
    },
    /// Show the stored itinerary and its best offers
    Show,
    /// Check that the itinerary service is reachable
    Health,
    /// Forget the stored itinerary
    Reset,
    /// List interests, regions, origin airports and travel classes
    Options,
}
