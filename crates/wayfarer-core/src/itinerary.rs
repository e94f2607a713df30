use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sections;
use crate::types::JobStatus;

// ---------------------------------------------------------------------------
// Leaf types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weather {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_chance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
    pub day_number: u32,
    pub date: String,
    pub title: String,
    pub activities: Vec<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    pub total: f64,
    pub currency: String,
    pub breakdown: BTreeMap<String, f64>,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            total: 0.0,
            currency: "USD".to_string(),
            breakdown: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transportation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visa_requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_recommendations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Agent-result blocks
// ---------------------------------------------------------------------------
//
// The generation backend fans the job out to specialist agents; each block
// below is one agent's raw output. They are mostly long-form prose — the
// section extractor mines day-scoped fragments out of them when the
// structured fields are missing.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchResult {
    pub query: String,
    pub research: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherInfoResult {
    pub query: String,
    pub weather_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationPlanResult {
    pub query: String,
    pub plan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetPlanResult {
    pub query: String,
    pub full_plan: String,
    pub total: f64,
    pub per_person: f64,
    pub per_day: f64,
    pub per_person_per_day: f64,
    pub currency: String,
    pub breakdown: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitiesResult {
    pub query: String,
    pub recommendations: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccommodationsResult {
    pub query: String,
    pub recommendations: String,
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    pub budget: String,
    pub travelers: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightResult {
    pub query: String,
    pub response: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub one_way: bool,
    pub num_passengers: u32,
    pub recommendation: String,
    pub booking_info: String,
}

// ---------------------------------------------------------------------------
// Itinerary (view model)
// ---------------------------------------------------------------------------

/// The reconciled, consumer-ready itinerary.
///
/// Produced exclusively by [`crate::reconcile::reconcile`] and immutable
/// afterwards — a new payload yields a new `Itinerary`, never an in-place
/// patch. Two fields are guaranteed populated: `days` is always a sequence
/// (placeholder-synthesized when the payload had none) and
/// `budget.breakdown` is always a map. Everything else is as-received.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Itinerary {
    pub id: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Effective trip length in days; also the length of a synthesized
    /// `days` sequence.
    pub duration: u32,
    pub days: Vec<DayPlan>,
    pub budget: Budget,
    pub overview: Option<Overview>,
    pub practical_info: Option<PracticalInfo>,
    pub destination_research: Option<ResearchResult>,
    pub weather_info: Option<WeatherInfoResult>,
    pub budget_plan: Option<BudgetPlanResult>,
    /// Day-by-day recommendations prose, kept for section-extraction
    /// fallback when a day has no structured activities.
    pub activities_narrative: Option<ActivitiesResult>,
    pub accommodations: Option<AccommodationsResult>,
    pub flights: Option<FlightResult>,
    pub status: Option<JobStatus>,
    pub message: Option<String>,
}

impl Itinerary {
    /// True while the backend is still working on the job.
    pub fn is_generating(&self) -> bool {
        matches!(
            self.status,
            Some(JobStatus::Submitted)
                | Some(JobStatus::Processing)
                | Some(JobStatus::Generating)
                | Some(JobStatus::Unknown)
        )
    }

    /// Overview prose for display: structured overview description when
    /// present, else the first 500 characters of the destination research;
    /// in both cases with the practical-information tail removed and
    /// markdown markers stripped. Empty string when neither source exists.
    pub fn overview_text(&self) -> String {
        let raw = match self
            .overview
            .as_ref()
            .and_then(|o| o.description.as_deref())
        {
            Some(desc) => desc.to_string(),
            None => match self.destination_research.as_ref() {
                Some(r) if !r.research.is_empty() => {
                    let cut: String = r.research.chars().take(500).collect();
                    format!("{cut}...")
                }
                _ => return String::new(),
            },
        };
        sections::remove_markdown_symbols(&sections::remove_practical_section(&raw))
    }

    /// Best-effort prose for one day when its structured activity list is
    /// empty: the day's own description, else the matching "Day N" section
    /// of the activities narrative. Empty string when neither exists.
    pub fn day_section(&self, day_number: u32) -> String {
        if let Some(day) = self.days.iter().find(|d| d.day_number == day_number) {
            if let Some(desc) = day.description.as_deref() {
                if !desc.trim().is_empty() {
                    return desc.trim().to_string();
                }
            }
        }
        match self.activities_narrative.as_ref() {
            Some(n) => sections::extract_day_section(&n.recommendations, day_number),
            None => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_default_is_usd_zero() {
        let b = Budget::default();
        assert_eq!(b.total, 0.0);
        assert_eq!(b.currency, "USD");
        assert!(b.breakdown.is_empty());
    }

    #[test]
    fn day_plan_tolerates_sparse_json() {
        let day: DayPlan = serde_json::from_str(r#"{"day_number": 2}"#).unwrap();
        assert_eq!(day.day_number, 2);
        assert!(day.activities.is_empty());
        assert!(day.description.is_none());
    }

    #[test]
    fn overview_text_prefers_structured_description() {
        let it = Itinerary {
            overview: Some(Overview {
                description: Some("**Porto** is lovely.\n## Practical Information\nEUR".into()),
                ..Default::default()
            }),
            destination_research: Some(ResearchResult {
                query: String::new(),
                research: "should not be used".into(),
            }),
            ..Default::default()
        };
        assert_eq!(it.overview_text(), "Porto is lovely.");
    }

    #[test]
    fn overview_text_falls_back_to_research_prefix() {
        let long = "a".repeat(600);
        let it = Itinerary {
            destination_research: Some(ResearchResult {
                query: String::new(),
                research: long,
            }),
            ..Default::default()
        };
        let text = it.overview_text();
        assert_eq!(text.len(), 503); // 500 chars + "..."
    }

    #[test]
    fn overview_text_empty_when_no_source() {
        assert_eq!(Itinerary::default().overview_text(), "");
    }

    #[test]
    fn day_section_prefers_day_description() {
        let it = Itinerary {
            days: vec![DayPlan {
                day_number: 1,
                description: Some("  Walk the old town.  ".into()),
                ..Default::default()
            }],
            activities_narrative: Some(ActivitiesResult {
                query: String::new(),
                recommendations: "### Day 1\nIgnored narrative.".into(),
            }),
            ..Default::default()
        };
        assert_eq!(it.day_section(1), "Walk the old town.");
    }

    #[test]
    fn day_section_falls_back_to_narrative() {
        let it = Itinerary {
            days: vec![DayPlan {
                day_number: 2,
                ..Default::default()
            }],
            activities_narrative: Some(ActivitiesResult {
                query: String::new(),
                recommendations: "### Day 2: Museums\nVisit the Louvre.\n### Day 3: Food".into(),
            }),
            ..Default::default()
        };
        let section = it.day_section(2);
        assert!(section.contains("Visit the Louvre."));
        assert!(!section.contains("Day 3"));
    }
}
