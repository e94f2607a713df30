use serde::{Deserialize, Serialize};

use crate::itinerary::{
    AccommodationsResult, Activity, ActivitiesResult, Budget, BudgetPlanResult, DayPlan,
    FlightResult, LocationPlanResult, Overview, PracticalInfo, ResearchResult, WeatherInfoResult,
};
use crate::types::JobStatus;

// ---------------------------------------------------------------------------
// ActivitiesField
// ---------------------------------------------------------------------------

/// The top-level `activities` field is schema-polymorphic upstream: a flat
/// list of activities tagged with their day, or a single prose block of
/// day-by-day recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivitiesField {
    PerDay(Vec<DayActivity>),
    Narrative(ActivitiesResult),
}

/// One entry of the flat `activities` list: an [`Activity`] plus the day
/// it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    #[serde(default)]
    pub day_number: Option<u32>,
    #[serde(flatten)]
    pub activity: Activity,
}

// ---------------------------------------------------------------------------
// RawPayload
// ---------------------------------------------------------------------------

/// The as-received response of `GET /itinerary/{job_id}`.
///
/// A generation job fills this in incrementally, so any field may be
/// missing at any point — including on a `complete` job. Every field is
/// therefore optional and the whole struct is `#[serde(default)]`: partial
/// JSON always deserializes, and normalization is the reconciler's problem,
/// not the caller's. A `RawPayload` is transient — it is dropped after the
/// reconciliation pass that consumes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPayload {
    pub id: Option<String>,
    pub status: Option<JobStatus>,
    pub message: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<u32>,
    pub days: Option<Vec<DayPlan>>,
    pub budget: Option<Budget>,
    pub overview: Option<Overview>,
    pub practical_info: Option<PracticalInfo>,
    pub destination_research: Option<ResearchResult>,
    pub weather_info: Option<WeatherInfoResult>,
    pub location_plan: Option<LocationPlanResult>,
    pub budget_plan: Option<BudgetPlanResult>,
    pub activities: Option<ActivitiesField>,
    pub accommodations: Option<AccommodationsResult>,
    pub flights: Option<FlightResult>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RawPayload {
    /// Parse a payload from a JSON document.
    pub fn from_json(data: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
