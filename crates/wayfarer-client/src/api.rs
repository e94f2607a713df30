use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use wayfarer_core::payload::RawPayload;
use wayfarer_core::types::{PlanSubmission, QuestionAnswer, StatusProbe, TravelPreferences};

use crate::error::{ClientError, Result};

// ─── TravelApi ────────────────────────────────────────────────────────────

/// The backend surface the polling session drives.
///
/// A trait so the session can be exercised against scripted responses in
/// tests; [`HttpTravelApi`] is the production implementation.
#[async_trait]
pub trait TravelApi: Send + Sync {
    /// `POST /generate-plan` — submit preferences, receive a job handle.
    async fn generate_plan(&self, prefs: &TravelPreferences) -> Result<PlanSubmission>;

    /// `GET /itinerary/{job_id}` — the full (possibly partial) payload.
    async fn fetch_itinerary(&self, job_id: &str) -> Result<RawPayload>;

    /// `GET /check-status/{job_id}` — lightweight readiness probe.
    async fn check_status(&self, job_id: &str) -> Result<StatusProbe>;

    /// `POST /ask-question` — follow-up question about a generated itinerary.
    async fn ask_question(&self, itinerary_id: &str, question: &str) -> Result<QuestionAnswer>;
}

// ─── HttpTravelApi ────────────────────────────────────────────────────────

/// reqwest-backed [`TravelApi`] implementation.
pub struct HttpTravelApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTravelApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.client.get(url).send().await?;
        read_json(resp).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.client.post(url).json(body).send().await?;
        read_json(resp).await
    }
}

/// Request body for `POST /ask-question`.
#[derive(Serialize)]
struct AskQuestionRequest<'a> {
    itinerary_id: &'a str,
    question: &'a str,
}

#[async_trait]
impl TravelApi for HttpTravelApi {
    async fn generate_plan(&self, prefs: &TravelPreferences) -> Result<PlanSubmission> {
        let url = format!("{}/generate-plan", self.base_url);
        self.post_json(&url, prefs).await
    }

    async fn fetch_itinerary(&self, job_id: &str) -> Result<RawPayload> {
        // Cache-busted per call so intermediaries never serve a stale
        // snapshot of a still-generating job.
        let url = format!(
            "{}/itinerary/{}?_={}",
            self.base_url,
            job_id,
            chrono::Utc::now().timestamp_millis()
        );
        self.get_json(&url).await
    }

    async fn check_status(&self, job_id: &str) -> Result<StatusProbe> {
        let url = format!("{}/check-status/{}", self.base_url, job_id);
        self.get_json(&url).await
    }

    async fn ask_question(&self, itinerary_id: &str, question: &str) -> Result<QuestionAnswer> {
        let url = format!("{}/ask-question", self.base_url);
        self.post_json(
            &url,
            &AskQuestionRequest {
                itinerary_id,
                question,
            },
        )
        .await
    }
}

// ─── Response handling ────────────────────────────────────────────────────

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }
    serde_json::from_str(&body).map_err(|source| ClientError::Decode { body, source })
}

/// Mine a human-readable message out of an error body: the backend sends
/// `{"detail": ...}` or `{"message": ...}`; anything else degrades to the
/// status line.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| {
            format!(
                "Error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        })
}

// ─── Tests ────────────────────────────────────────────────────────────────
