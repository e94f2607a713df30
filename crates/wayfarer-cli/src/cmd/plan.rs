use std::sync::Arc;

use clap::Args;

use wayfarer_client::{HttpTravelApi, TravelApi};
use wayfarer_core::types::TravelPreferences;

use crate::config::CliConfig;
use crate::output;

#[derive(Args)]
pub struct PlanArgs {
    /// Where to go
    #[arg(long)]
    pub destination: String,

    /// Trip start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,

    /// Trip end date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: String,

    /// Total budget; a currency suffix like "2000 USD" is accepted
    #[arg(long, default_value = "1000")]
    pub budget: String,

    #[arg(long, default_value_t = 2)]
    pub travelers: u32,

    /// Interest tag, repeatable (e.g. --interest food --interest museums)
    #[arg(long = "interest")]
    pub interests: Vec<String>,

    #[arg(long)]
    pub accommodation_type: Option<String>,

    #[arg(long)]
    pub travel_style: Option<String>,

    #[arg(long)]
    pub origin_city: Option<String>,

    /// Track the job immediately after submitting
    #[arg(long)]
    pub track: bool,
}

pub async fn run(
    api: Arc<HttpTravelApi>,
    args: PlanArgs,
    cfg: &CliConfig,
    json: bool,
) -> anyhow::Result<()> {
    // The backend parses the budget as a number; send only the numeric
    // part of "2000 USD"-style input.
    let budget = args
        .budget
        .split_whitespace()
        .next()
        .unwrap_or(&args.budget)
        .to_string();

    let prefs = TravelPreferences {
        destination: args.destination,
        start_date: args.start_date,
        end_date: args.end_date,
        budget,
        travelers: args.travelers,
        interests: args.interests,
        accommodation_type: args.accommodation_type,
        travel_style: args.travel_style,
        dietary_restrictions: Vec::new(),
        origin_city: args.origin_city,
    };

    let submission = api.generate_plan(&prefs).await?;
    if json && !args.track {
        output::print_json(&submission)?;
    } else {
        println!("Job submitted: {}", submission.job_id);
        if let Some(message) = submission.message.as_deref() {
            println!("{message}");
        }
    }

    if args.track {
        crate::cmd::track::run(api, &submission.job_id, cfg, json).await?;
    }
    Ok(())
}
