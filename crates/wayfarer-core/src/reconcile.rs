//! Reconciliation: turn a [`RawPayload`] of unknown completeness into an
//! invariant-respecting [`Itinerary`].
//!
//! After this pass, consumers can index `days` and `budget.breakdown`
//! without null checks. No other field is promoted beyond as-received.

use chrono::NaiveDate;

use crate::itinerary::{Budget, DayPlan, Itinerary, PracticalInfo};
use crate::payload::{ActivitiesField, RawPayload};
use crate::sections;

/// Derive a fresh view model from a payload.
///
/// Pure and idempotent; each call builds a new `Itinerary` rather than
/// patching a previous one, so a consumer never observes a partially
/// overwritten mix of two payloads.
pub fn reconcile(payload: &RawPayload) -> Itinerary {
    let duration = effective_duration(payload);

    // Rule 1: days are always a sequence, synthesized when absent.
    let mut days = match payload.days.as_ref() {
        Some(days) if !days.is_empty() => days.clone(),
        _ => placeholder_days(duration),
    };
    days.sort_by_key(|d| d.day_number);
    days.dedup_by_key(|d| d.day_number);

    // Rule 2: fold the flat per-day activities into their days, skipping
    // names a day already has.
    let mut narrative = None;
    match payload.activities.as_ref() {
        Some(ActivitiesField::PerDay(entries)) => {
            for entry in entries {
                let Some(day_number) = entry.day_number else {
                    continue;
                };
                if let Some(day) = days.iter_mut().find(|d| d.day_number == day_number) {
                    let duplicate = day.activities.iter().any(|a| a.name == entry.activity.name);
                    if !duplicate {
                        day.activities.push(entry.activity.clone());
                    }
                }
            }
        }
        Some(ActivitiesField::Narrative(n)) => narrative = Some(n.clone()),
        None => {}
    }

    // Rule 3: budget always exists and always has a breakdown map.
    let budget = payload.budget.clone().unwrap_or_else(Budget::default);

    // Practical-info fallback: mine the research prose, then weather info.
    let practical_info = fill_practical_info(payload);

    Itinerary {
        id: payload.id.clone(),
        destination: payload.destination.clone(),
        start_date: payload.start_date.clone(),
        end_date: payload.end_date.clone(),
        duration,
        days,
        budget,
        overview: payload.overview.clone(),
        practical_info,
        destination_research: payload.destination_research.clone(),
        weather_info: payload.weather_info.clone(),
        budget_plan: payload.budget_plan.clone(),
        activities_narrative: narrative,
        accommodations: payload.accommodations.clone(),
        flights: payload.flights.clone(),
        status: payload.status,
        message: payload.message.clone(),
    }
}

/// Trip length in days: the payload's own `duration`, else the
/// start/end date difference, else the day count, else 1.
fn effective_duration(payload: &RawPayload) -> u32 {
    if let Some(d) = payload.duration {
        if d >= 1 {
            return d;
        }
    }
    if let (Some(start), Some(end)) = (payload.start_date.as_deref(), payload.end_date.as_deref()) {
        if let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) {
            let diff = (end - start).num_days();
            if diff >= 1 {
                return diff as u32;
            }
            return 1;
        }
    }
    match payload.days.as_ref() {
        Some(days) if !days.is_empty() => days.len() as u32,
        _ => 1,
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

fn placeholder_days(duration: u32) -> Vec<DayPlan> {
    (1..=duration)
        .map(|n| DayPlan {
            day_number: n,
            title: format!("Day {n}"),
            ..Default::default()
        })
        .collect()
}

fn fill_practical_info(payload: &RawPayload) -> Option<PracticalInfo> {
    let mut info = payload.practical_info.clone();
    let has_text = info
        .as_ref()
        .and_then(|i| i.full_text.as_deref())
        .is_some_and(|t| !t.is_empty());
    if has_text {
        return info;
    }

    let mined = payload
        .destination_research
        .as_ref()
        .map(|r| sections::extract_practical_info(&r.research))
        .filter(|t| !t.is_empty())
        .or_else(|| {
            payload
                .weather_info
                .as_ref()
                .map(|w| w.weather_info.clone())
                .filter(|t| !t.is_empty())
        });

    if let Some(text) = mined {
        info.get_or_insert_with(PracticalInfo::default).full_text = Some(text);
    }
    info
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{Activity, ActivitiesResult, ResearchResult, WeatherInfoResult};
    use crate::payload::DayActivity;
    use crate::types::JobStatus;

    fn day(n: u32, activities: Vec<Activity>) -> DayPlan {
        DayPlan {
            day_number: n,
            activities,
            ..Default::default()
        }
    }

    fn named(name: &str) -> Activity {
        Activity {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn synthesizes_days_from_duration() {
        let payload = RawPayload {
            status: Some(JobStatus::Complete),
            duration: Some(3),
            ..Default::default()
        };
        let it = reconcile(&payload);
        assert_eq!(it.days.len(), 3);
        let numbers: Vec<u32> = it.days.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(it.days.iter().all(|d| d.activities.is_empty()));
        assert!(it.days.iter().all(|d| d.description.is_none()));
        assert_eq!(it.days[1].title, "Day 2");
    }

    #[test]
    fn synthesizes_days_from_date_range() {
        let payload = RawPayload {
            start_date: Some("2026-09-01".into()),
            end_date: Some("2026-09-05".into()),
            ..Default::default()
        };
        let it = reconcile(&payload);
        assert_eq!(it.duration, 4);
        assert_eq!(it.days.len(), 4);
    }

    #[test]
    fn synthesizes_single_day_when_nothing_known() {
        let it = reconcile(&RawPayload::default());
        assert_eq!(it.duration, 1);
        assert_eq!(it.days.len(), 1);
        assert_eq!(it.days[0].day_number, 1);
    }

    #[test]
    fn empty_days_list_is_treated_as_absent() {
        let payload = RawPayload {
            duration: Some(2),
            days: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(reconcile(&payload).days.len(), 2);
    }

    #[test]
    fn merge_dedups_by_name_within_day() {
        let payload = RawPayload {
            days: Some(vec![day(1, vec![named("Museum Visit")]), day(2, vec![])]),
            activities: Some(ActivitiesField::PerDay(vec![
                DayActivity {
                    day_number: Some(1),
                    activity: named("Museum Visit"),
                },
                DayActivity {
                    day_number: Some(1),
                    activity: named("Harbor Walk"),
                },
                DayActivity {
                    day_number: Some(2),
                    activity: named("Museum Visit"),
                },
            ])),
            ..Default::default()
        };
        let it = reconcile(&payload);
        let day1: Vec<&str> = it.days[0].activities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(day1, vec!["Museum Visit", "Harbor Walk"]);
        // Same name on a different day is not a duplicate.
        assert_eq!(it.days[1].activities.len(), 1);
    }

    #[test]
    fn merge_skips_unknown_and_missing_days() {
        let payload = RawPayload {
            days: Some(vec![day(1, vec![])]),
            activities: Some(ActivitiesField::PerDay(vec![
                DayActivity {
                    day_number: Some(9),
                    activity: named("Orphan"),
                },
                DayActivity {
                    day_number: None,
                    activity: named("Untagged"),
                },
            ])),
            ..Default::default()
        };
        let it = reconcile(&payload);
        assert!(it.days[0].activities.is_empty());
    }

    #[test]
    fn missing_budget_synthesized() {
        let it = reconcile(&RawPayload::default());
        assert_eq!(it.budget.total, 0.0);
        assert_eq!(it.budget.currency, "USD");
        assert!(it.budget.breakdown.is_empty());
    }

    #[test]
    fn budget_fields_preserved_breakdown_defaulted() {
        let json = r#"{"budget": {"total": 900.0, "currency": "EUR"}}"#;
        let payload: RawPayload = serde_json::from_str(json).unwrap();
        let it = reconcile(&payload);
        assert_eq!(it.budget.total, 900.0);
        assert_eq!(it.budget.currency, "EUR");
        assert!(it.budget.breakdown.is_empty());
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let json = r#"{
            "status": "complete",
            "destination": "Lisbon",
            "duration": 2,
            "activities": [{"day_number": 1, "name": "Tram 28"}],
            "budget": {"total": 500.0, "currency": "EUR", "breakdown": {"food": 150.0}}
        }"#;
        let payload: RawPayload = serde_json::from_str(json).unwrap();
        assert_eq!(reconcile(&payload), reconcile(&payload));
    }

    #[test]
    fn days_sorted_and_unique_by_day_number() {
        let payload = RawPayload {
            days: Some(vec![day(3, vec![]), day(1, vec![]), day(3, vec![named("Dup")])]),
            ..Default::default()
        };
        let it = reconcile(&payload);
        let numbers: Vec<u32> = it.days.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn narrative_activities_kept_for_section_fallback() {
        let payload = RawPayload {
            duration: Some(1),
            activities: Some(ActivitiesField::Narrative(ActivitiesResult {
                query: String::new(),
                recommendations: "### Day 1\nWander.".into(),
            })),
            ..Default::default()
        };
        let it = reconcile(&payload);
        assert!(it.activities_narrative.is_some());
        assert!(it.day_section(1).contains("Wander."));
    }

    #[test]
    fn practical_info_mined_from_research_when_absent() {
        let payload = RawPayload {
            destination_research: Some(ResearchResult {
                query: String::new(),
                research: "Intro.\n\nPractical Information\nCurrency: EUR\n\n2. More".into(),
            }),
            ..Default::default()
        };
        let it = reconcile(&payload);
        let text = it.practical_info.unwrap().full_text.unwrap();
        assert!(text.contains("Currency: EUR"));
    }

    #[test]
    fn practical_info_falls_back_to_weather() {
        let payload = RawPayload {
            weather_info: Some(WeatherInfoResult {
                query: String::new(),
                weather_info: "Mild and sunny.".into(),
            }),
            ..Default::default()
        };
        let it = reconcile(&payload);
        assert_eq!(
            it.practical_info.unwrap().full_text.as_deref(),
            Some("Mild and sunny.")
        );
    }

    #[test]
    fn existing_practical_text_not_overwritten() {
        let json = r#"{
            "practical_info": {"full_text": "Already here."},
            "destination_research": {"query": "", "research": "Practical Information\nMined."}
        }"#;
        let payload: RawPayload = serde_json::from_str(json).unwrap();
        let it = reconcile(&payload);
        assert_eq!(
            it.practical_info.unwrap().full_text.as_deref(),
            Some("Already here.")
        );
    }
}
