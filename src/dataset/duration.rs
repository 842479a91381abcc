use regex::Regex;
use std::sync::OnceLock;

/// Hours assumed when a non-empty duration text matches no unit
pub const FALLBACK_HOURS: u32 = 4;

const WEEK_HOURS: u32 = 40;
const DAY_HOURS: u32 = 8;

struct UnitPatterns {
    week: Regex,
    day: Regex,
    hour: Regex,
}

fn patterns() -> &'static UnitPatterns {
    static PATTERNS: OnceLock<UnitPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| UnitPatterns {
        week: Regex::new(r"([0-9]+)\s*week").expect("static week pattern"),
        day: Regex::new(r"([0-9]+)\s*day").expect("static day pattern"),
        hour: Regex::new(r"([0-9]+)\s*hour").expect("static hour pattern"),
    })
}

/// Count for one unit keyword: the first ASCII integer directly preceding it.
/// A keyword with no number in front contributes nothing, and counts too large
/// for a `u32` clamp to `u32::MAX`.
fn unit_count(text: &str, keyword: &str, pattern: &Regex) -> u32 {
    if !text.contains(keyword) {
        return 0;
    }

    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| saturating_count(m.as_str()))
        .unwrap_or(0)
}

fn saturating_count(digits: &str) -> u32 {
    // Digits only, so the sole parse failure is overflow
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Convert a free-text effort estimate ("2 weeks", "1 week 2 days") into hours.
///
/// Weeks count 40 hours and days 8. Empty text is 0, while text that yields no
/// effort at all ("bogus", "0 days") falls back to [`FALLBACK_HOURS`].
pub fn parse_duration(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }

    let lower = text.to_lowercase();
    let p = patterns();

    let hours = unit_count(&lower, "week", &p.week)
        .saturating_mul(WEEK_HOURS)
        .saturating_add(unit_count(&lower, "day", &p.day).saturating_mul(DAY_HOURS))
        .saturating_add(unit_count(&lower, "hour", &p.hour));

    if hours == 0 {
        FALLBACK_HOURS
    } else {
        hours
    }
}
