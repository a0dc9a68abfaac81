//! Date and text formatting shared by the pages.

use chrono::{DateTime, Utc};

/// "Jan 20, 2026".
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// "Jan 20, 2026 9:35 PM".
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// Coarse age of a timestamp for notification lists: "just now",
/// "5m ago", "3h ago", "2d ago", then the plain date.
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        format_date(at)
    }
}

/// Title Case a snake_case value (e.g. "on_site" -> "On Site").
pub fn format_snake_case_title(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Value for an `<input type="date">`.
pub fn date_input_value(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Read an `<input type="date">` value as end of that day, UTC, so an
/// internship stays open through its deadline date.
pub fn parse_date_input(value: &str) -> Option<DateTime<Utc>> {
    let date = chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
    date.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc())
}

/// Trimmed text, or `None` when blank.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn dates_are_human_readable() {
        assert_eq!(format_date(at(2026, 1, 20, 21, 35)), "Jan 20, 2026");
        assert_eq!(format_datetime(at(2026, 1, 20, 21, 35)), "Jan 20, 2026 9:35 PM");
        assert_eq!(format_datetime(at(2026, 3, 5, 0, 5)), "Mar 5, 2026 12:05 AM");
    }

    #[test]
    fn relative_buckets() {
        let now = at(2026, 6, 10, 12, 0);
        assert_eq!(format_relative(now - Duration::seconds(20), now), "just now");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2d ago");
        assert_eq!(format_relative(now - Duration::days(30), now), "May 11, 2026");
    }

    #[test]
    fn snake_case_to_title() {
        assert_eq!(format_snake_case_title("under_review"), "Under Review");
        assert_eq!(format_snake_case_title("remote"), "Remote");
    }

    #[test]
    fn date_input_round_trip_lands_on_end_of_day() {
        let parsed = parse_date_input("2026-08-31").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 31, 23, 59, 59).unwrap());
        assert_eq!(date_input_value(parsed), "2026-08-31");
        assert_eq!(parse_date_input("31/08/2026"), None);
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty("  CSE "), Some("CSE".to_string()));
    }
}
