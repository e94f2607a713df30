use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a server-side itinerary-generation job.
///
/// Transitions move monotonically toward `complete` or `error`; those two
/// are terminal and must stop all polling. `Unknown` absorbs any status
/// string a newer backend might emit — pollers treat it as "still running".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Submitted,
    Processing,
    Generating,
    Complete,
    Error,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Submitted => "submitted",
            JobStatus::Processing => "processing",
            JobStatus::Generating => "generating",
            JobStatus::Complete => "complete",
            JobStatus::Error => "error",
            JobStatus::Unknown => "unknown",
        }
    }

    /// `complete` and `error` are final — no further polling follows.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = crate::error::WayfarerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(JobStatus::Submitted),
            "processing" => Ok(JobStatus::Processing),
            "generating" => Ok(JobStatus::Generating),
            "complete" => Ok(JobStatus::Complete),
            "error" => Ok(JobStatus::Error),
            _ => Err(crate::error::WayfarerError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// StatusProbe
// ---------------------------------------------------------------------------

/// Lightweight response from `GET /check-status/{job_id}`.
///
/// Cheap to serve on a still-running job; carries no itinerary data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusProbe {
    pub job_id: String,
    pub status: Option<JobStatus>,
    pub message: Option<String>,
    pub ready: bool,
}

// ---------------------------------------------------------------------------
// PlanSubmission
// ---------------------------------------------------------------------------

/// Response from `POST /generate-plan` — the job handle for everything else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSubmission {
    pub job_id: String,
    pub status: Option<JobStatus>,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// TravelPreferences
// ---------------------------------------------------------------------------

/// Request body for `POST /generate-plan`.
///
/// Field naming follows the backend contract: `startDate`/`endDate` are
/// camelCase, everything else snake_case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelPreferences {
    pub destination: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    /// Numeric amount as a string — the backend parses it server-side.
    pub budget: String,
    pub travelers: u32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_style: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_restrictions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_city: Option<String>,
}

// ---------------------------------------------------------------------------
// QuestionAnswer
// ---------------------------------------------------------------------------

/// Response from `POST /ask-question`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionAnswer {
    pub itinerary_id: String,
    pub question: String,
    pub answer: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
