use std::sync::Arc;

use wayfarer_client::{HttpTravelApi, TravelApi};
use wayfarer_core::reconcile::reconcile;

use crate::output;

/// One-shot fetch: reconcile whatever the backend has right now and render it.
pub async fn run(api: Arc<HttpTravelApi>, job_id: &str, json: bool) -> anyhow::Result<()> {
    let payload = api.fetch_itinerary(job_id).await?;
    let itinerary = reconcile(&payload);
    if json {
        output::print_json(&itinerary)?;
    } else {
        output::print_itinerary(&itinerary);
    }
    Ok(())
}
