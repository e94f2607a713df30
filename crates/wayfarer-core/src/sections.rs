//! Best-effort extraction of day-scoped and topical fragments from
//! model-generated prose.
//!
//! The generation backend returns long markdown-flavored text blocks; when
//! the structured per-day fields are missing, these transforms slice the
//! relevant section out of the prose. All of them are pure string
//! functions: "not found" is an empty string, never an error.

use regex::Regex;
use std::sync::OnceLock;

static HEADING_RE: OnceLock<Regex> = OnceLock::new();
static BOLD_RE: OnceLock<Regex> = OnceLock::new();
static ITALIC_RE: OnceLock<Regex> = OnceLock::new();
static BULLET_RE: OnceLock<Regex> = OnceLock::new();
static BACKTICK_RE: OnceLock<Regex> = OnceLock::new();
static PRACTICAL_TAIL_RE: OnceLock<Regex> = OnceLock::new();
static NEXT_DAY_RE: OnceLock<Regex> = OnceLock::new();
static PRACTICAL_HEAD_RE: OnceLock<Regex> = OnceLock::new();
static SECTION_END_RE: OnceLock<Regex> = OnceLock::new();

/// Strip markdown markers: heading hashes, bold/italic asterisks, leading
/// bullet markers, and backticks. Whitespace-trimmed.
pub fn remove_markdown_symbols(text: &str) -> String {
    let heading = HEADING_RE.get_or_init(|| Regex::new(r"(?m)^#{1,6}\s+").unwrap());
    let bold = BOLD_RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
    let italic = ITALIC_RE.get_or_init(|| Regex::new(r"\*(.*?)\*").unwrap());
    let bullet = BULLET_RE.get_or_init(|| Regex::new(r"(?m)^[-*+]\s+").unwrap());
    let backtick = BACKTICK_RE.get_or_init(|| Regex::new(r"`+").unwrap());

    let text = heading.replace_all(text, "");
    let text = bold.replace_all(&text, "$1");
    let text = italic.replace_all(&text, "$1");
    let text = bullet.replace_all(&text, "");
    let text = backtick.replace_all(&text, "");
    text.trim().to_string()
}

/// Truncate an overview at the first "Practical Information" heading,
/// discarding the heading and everything after it, so practical info is
/// not duplicated inside the general overview.
pub fn remove_practical_section(overview: &str) -> String {
    let re = PRACTICAL_TAIL_RE
        .get_or_init(|| Regex::new(r"(?is)#{1,6}\s*practical information.*").unwrap());
    re.replace(overview, "").trim().to_string()
}

/// Extract the "Day N" section of a day-by-day prose block: everything
/// from the "Day N" heading (optional markdown hashes, case-insensitive)
/// up to the next "Day M" heading or end of text, markdown-stripped.
/// Empty string when the day is not mentioned.
pub fn extract_day_section(text: &str, day_number: u32) -> String {
    if text.is_empty() {
        return String::new();
    }
    // Per-call regex: the day number is part of the pattern. u32 input, so
    // no escaping concerns.
    let start_re = match Regex::new(&format!(r"(?i)(#+\s*)?day\s*{day_number}[:\s]")) {
        Ok(re) => re,
        Err(_) => return String::new(),
    };
    let Some(m) = start_re.find(text) else {
        return String::new();
    };
    let body = &text[m.end()..];
    let next_day = NEXT_DAY_RE.get_or_init(|| Regex::new(r"(?i)(#+\s*)?day\s*\d+").unwrap());
    let end = next_day.find(body).map(|n| n.start()).unwrap_or(body.len());
    remove_markdown_symbols(&body[..end])
}

/// Mine a practical-information section out of destination research prose.
/// Accepts the three heading spellings the backend emits; the section runs
/// to the next numbered paragraph boundary (`\n\n<digit>.`) or end of text.
/// Returns the raw (unstripped) section, empty when absent.
pub fn extract_practical_info(research: &str) -> String {
    let head = PRACTICAL_HEAD_RE.get_or_init(|| {
        Regex::new(r"(?i)practical information|travel logistics|essential information").unwrap()
    });
    let Some(m) = head.find(research) else {
        return String::new();
    };
    let body = &research[m.start()..];
    let end_re = SECTION_END_RE.get_or_init(|| Regex::new(r"\n\n\d+\.").unwrap());
    let end = end_re.find(body).map(|n| n.start()).unwrap_or(body.len());
    body[..end].to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_headings_bold_bullets_backticks() {
        let text = "## Title\n**bold** and *italic*\n- bullet one\n`code`";
        let out = remove_markdown_symbols(text);
        assert_eq!(out, "Title\nbold and italic\nbullet one\ncode");
    }

    #[test]
    fn strip_is_noop_on_plain_text() {
        assert_eq!(remove_markdown_symbols("plain text"), "plain text");
    }

    #[test]
    fn strip_trims_whitespace() {
        assert_eq!(remove_markdown_symbols("  padded  "), "padded");
    }

    #[test]
    fn removes_practical_tail() {
        let out = remove_practical_section("City is lovely.\n## Practical Information\nCurrency: EUR");
        assert_eq!(out, "City is lovely.");
    }

    #[test]
    fn practical_tail_case_insensitive() {
        let out = remove_practical_section("Go here.\n### PRACTICAL INFORMATION\nstuff");
        assert_eq!(out, "Go here.");
    }

    #[test]
    fn practical_tail_absent_is_noop() {
        assert_eq!(remove_practical_section("Just an overview."), "Just an overview.");
    }

    #[test]
    fn extracts_middle_day_section() {
        let text = "### Day 1: Arrival\nCheck in.\n### Day 2: Museums\nVisit the Louvre.\n### Day 3: Food\nEat well.";
        let out = extract_day_section(text, 2);
        assert!(out.contains("Visit the Louvre."));
        assert!(!out.contains("Day 3"));
        assert!(!out.contains("Eat well."));
    }

    #[test]
    fn extracts_last_day_to_end_of_text() {
        let text = "Day 1: Arrival\nCheck in.\nDay 2: Departure\nFly home.";
        let out = extract_day_section(text, 2);
        assert!(out.contains("Fly home."));
    }

    #[test]
    fn extraction_strips_markdown() {
        let text = "### Day 1\n- **Morning**: walk\n- Evening: dine\n### Day 2\nx";
        let out = extract_day_section(text, 1);
        assert!(out.contains("Morning: walk"));
        assert!(!out.contains("**"));
        assert!(!out.contains("- "));
    }

    #[test]
    fn missing_day_yields_empty_string() {
        assert_eq!(extract_day_section("### Day 1\nonly day", 4), "");
        assert_eq!(extract_day_section("", 1), "");
    }

    #[test]
    fn day_heading_without_hashes_matches() {
        let out = extract_day_section("Day 3: Coast\nDrive south.", 3);
        assert!(out.contains("Drive south."));
    }

    #[test]
    fn practical_info_mined_from_research() {
        let research = "1. Overview\nGreat city.\n\nPractical Information\nCurrency: EUR\nLanguage: PT\n\n2. Weather\nMild.";
        let out = extract_practical_info(research);
        assert!(out.starts_with("Practical Information"));
        assert!(out.contains("Currency: EUR"));
        assert!(!out.contains("Weather"));
    }

    #[test]
    fn practical_info_alternate_headings() {
        let out = extract_practical_info("Travel Logistics\nTrains run hourly.");
        assert!(out.contains("Trains run hourly."));
        assert_eq!(extract_practical_info("nothing relevant here"), "");
    }
}
