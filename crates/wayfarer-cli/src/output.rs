use serde::Serialize;

use wayfarer_core::itinerary::{Budget, Itinerary};
use wayfarer_core::sections;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  "));

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

/// Render a reconciled itinerary for the terminal: header, per-day plans
/// (structured activities, or extracted prose when a day has none), budget
/// breakdown, and the practical-information section.
pub fn print_itinerary(itinerary: &Itinerary) {
    let destination = itinerary.destination.as_deref().unwrap_or("Your Trip");
    println!("{destination}");
    match (itinerary.start_date.as_deref(), itinerary.end_date.as_deref()) {
        (Some(start), Some(end)) => println!(
            "{start} - {end} ({} {})",
            itinerary.duration,
            if itinerary.duration == 1 { "day" } else { "days" }
        ),
        _ => println!(
            "{} {}",
            itinerary.duration,
            if itinerary.duration == 1 { "day" } else { "days" }
        ),
    }
    if let Some(status) = itinerary.status {
        if !status.is_terminal() {
            println!("Status: {status}");
            if let Some(message) = itinerary.message.as_deref() {
                println!("{message}");
            }
        }
    }

    let overview = itinerary.overview_text();
    if !overview.is_empty() {
        println!("\n{overview}");
    }

    for day in &itinerary.days {
        if day.title.is_empty() {
            println!("\nDay {}", day.day_number);
        } else {
            println!("\nDay {}: {}", day.day_number, day.title);
        }
        if !day.date.is_empty() {
            println!("  {}", day.date);
        }
        if day.activities.is_empty() {
            let section = itinerary.day_section(day.day_number);
            if section.is_empty() {
                println!("  (no activities planned yet)");
            } else {
                for line in section.lines() {
                    println!("  {line}");
                }
            }
        } else {
            for activity in &day.activities {
                let mut line = format!("  - {}", activity.name);
                if let Some(time) = activity.time.as_deref() {
                    line.push_str(&format!(" [{time}]"));
                }
                if let Some(cost) = activity.cost {
                    line.push_str(&format!(" ({} {cost:.0})", itinerary.budget.currency));
                }
                println!("{line}");
                if let Some(location) = activity.location.as_ref() {
                    if !location.name.is_empty() {
                        println!("      at {}", location.name);
                    }
                }
            }
        }
    }

    print_budget(&itinerary.budget, itinerary.duration);

    if let Some(text) = itinerary
        .practical_info
        .as_ref()
        .and_then(|p| p.full_text.as_deref())
    {
        println!("\nPractical information");
        for line in sections::remove_markdown_symbols(text).lines() {
            println!("  {line}");
        }
    }

    if let Some(flights) = itinerary.flights.as_ref() {
        if !flights.recommendation.is_empty() {
            println!("\nFlights ({} to {})", flights.origin, flights.destination);
            for line in sections::remove_markdown_symbols(&flights.recommendation).lines() {
                println!("  {line}");
            }
        }
    }
}

fn print_budget(budget: &Budget, duration: u32) {
    println!("\nBudget: {} {:.0} total", budget.currency, budget.total);
    let per_day = budget.total / f64::from(duration.max(1));
    println!("Daily average: {} {per_day:.0}", budget.currency);
    if budget.breakdown.is_empty() {
        return;
    }
    let total = if budget.total > 0.0 { budget.total } else { 1.0 };
    let rows: Vec<Vec<String>> = budget
        .breakdown
        .iter()
        .map(|(category, amount)| {
            vec![
                category.replace('_', " "),
                format!("{} {amount:.0}", budget.currency),
                format!("{}%", (amount / total * 100.0).round()),
            ]
        })
        .collect();
    print_table(&["Category", "Amount", "Share"], rows);
}
