mod cmd;
mod config;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wayfarer_client::HttpTravelApi;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "wayfarer",
    about = "Track AI travel-itinerary generation jobs from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Backend API base URL (overrides the config file)
    #[arg(long, global = true, env = "WAYFARER_API_URL")]
    api_url: Option<String>,

    /// Path to a YAML config file
    #[arg(long, global = true, env = "WAYFARER_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a trip request and print the job id
    Plan(cmd::plan::PlanArgs),

    /// Poll a generation job until it completes or fails
    Track {
        /// Job id returned by `wayfarer plan`
        job_id: String,
    },

    /// Fetch and render an itinerary once, however partial
    Show {
        job_id: String,
    },

    /// Ask a follow-up question about a generated itinerary
    Ask {
        itinerary_id: String,
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = CliConfig::load(cli.config.as_deref())?;
    let api_url = cli.api_url.as_deref().unwrap_or(&cfg.api_url);
    tracing::debug!(api_url, "resolved backend endpoint");
    let api = Arc::new(HttpTravelApi::new(
        api_url,
        Duration::from_secs(cfg.timeout_secs),
    )?);

    match cli.command {
        Commands::Plan(args) => cmd::plan::run(api, args, &cfg, cli.json).await,
        Commands::Track { job_id } => cmd::track::run(api, &job_id, &cfg, cli.json).await,
        Commands::Show { job_id } => cmd::show::run(api, &job_id, cli.json).await,
        Commands::Ask {
            itinerary_id,
            question,
        } => cmd::ask::run(api, &itinerary_id, &question, cli.json).await,
    }
}
