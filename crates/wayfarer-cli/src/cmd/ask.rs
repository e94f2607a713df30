use std::sync::Arc;

use wayfarer_client::{HttpTravelApi, TravelApi};

use crate::output;

pub async fn run(
    api: Arc<HttpTravelApi>,
    itinerary_id: &str,
    question: &str,
    json: bool,
) -> anyhow::Result<()> {
    let answer = api.ask_question(itinerary_id, question).await?;
    if json {
        output::print_json(&answer)?;
    } else {
        println!("{}", answer.answer);
    }
    Ok(())
}
