use std::sync::Arc;

use wayfarer_client::{HttpTravelApi, PollingSession, TravelApi};
use wayfarer_core::types::JobStatus;

use crate::config::CliConfig;
use crate::output;

/// Drive a polling session to its terminal state, streaming status lines
/// to stdout along the way.
pub async fn run(
    api: Arc<HttpTravelApi>,
    job_id: &str,
    cfg: &CliConfig,
    json: bool,
) -> anyhow::Result<()> {
    let api: Arc<dyn TravelApi> = api;
    let session = PollingSession::start(api, job_id, cfg.poll.to_poll_config());
    let mut rx = session.subscribe();
    let mut last_status: Option<JobStatus> = None;

    loop {
        let snapshot = rx.borrow_and_update().clone();

        if !json {
            if let Some(status) = snapshot.status {
                if last_status != Some(status) {
                    match snapshot.message.as_deref() {
                        Some(message) if !message.is_empty() => {
                            println!("status: {status} ({message})")
                        }
                        _ => println!("status: {status}"),
                    }
                    last_status = Some(status);
                }
            }
        }

        if !snapshot.polling_enabled {
            if let Some(err) = snapshot.error {
                anyhow::bail!("{err}");
            }
            match snapshot.itinerary {
                Some(itinerary) if json => output::print_json(&*itinerary)?,
                Some(itinerary) => {
                    println!();
                    output::print_itinerary(&itinerary);
                }
                None => println!("tracking finished with no itinerary data"),
            }
            return Ok(());
        }

        if rx.changed().await.is_err() {
            return Ok(());
        }
    }
}
