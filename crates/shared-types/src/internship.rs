use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::common::{normalize, ParseEnumError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum InternshipStatus {
    #[default]
    Open,
    Closed,
    Draft,
}

impl InternshipStatus {
    pub fn parse(s: &str) -> Result<Self, ParseEnumError> {
        match normalize(s).as_str() {
            "open" => Ok(InternshipStatus::Open),
            "closed" => Ok(InternshipStatus::Closed),
            "draft" => Ok(InternshipStatus::Draft),
            _ => Err(ParseEnumError::new("internship status", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InternshipStatus::Open => "open",
            InternshipStatus::Closed => "closed",
            InternshipStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for InternshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for InternshipStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

/// An internship opening posted by an admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    /// Work mode as entered by the poster, e.g. "Remote" or "On-site".
    pub mode: String,
    /// Engagement type, e.g. "Summer" or "Full-time".
    pub internship_type: String,
    pub stipend: Option<String>,
    pub eligibility: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub deadline: DateTime<Utc>,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    pub status: InternshipStatus,
    pub posted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Internship {
    /// Open and not past its deadline.
    pub fn is_accepting(&self, now: DateTime<Utc>) -> bool {
        self.status == InternshipStatus::Open && self.deadline >= now
    }

    /// Case-insensitive substring match over title, company and tags. An
    /// empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.company.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Whole days until the deadline, rounded up.
    pub fn days_until_deadline(&self, now: DateTime<Utc>) -> i64 {
        const DAY_MS: i64 = 24 * 60 * 60 * 1000;
        let ms = (self.deadline - now).num_milliseconds();
        // ceiling division that also holds for negative spans
        ms.div_euclid(DAY_MS) + i64::from(ms.rem_euclid(DAY_MS) != 0)
    }

    /// "N days left" while the deadline is ahead, otherwise "Deadline today".
    pub fn deadline_label(&self, now: DateTime<Utc>) -> String {
        match self.days_until_deadline(now) {
            1 => "1 day left".to_string(),
            days if days > 0 => format!("{days} days left"),
            _ => "Deadline today".to_string(),
        }
    }
}

/// Filter a listing by search query, keeping order.
pub fn filter_internships<'a>(items: &'a [Internship], query: &str) -> Vec<&'a Internship> {
    items.iter().filter(|i| i.matches_search(query)).collect()
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for posting a new internship.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateInternshipRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 200, message = "Title is required"))
    )]
    pub title: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Company is required"))
    )]
    pub company: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Description is required"))
    )]
    pub description: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Location is required"))
    )]
    pub location: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Mode is required"))
    )]
    pub mode: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Type is required"))
    )]
    pub internship_type: String,
    #[serde(default)]
    pub stipend: Option<String>,
    #[serde(default)]
    pub eligibility: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub deadline: DateTime<Utc>,
    /// Defaults to `open`.
    #[serde(default)]
    pub status: Option<InternshipStatus>,
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn internship(title: &str, company: &str, tags: &[&str]) -> Internship {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        Internship {
            id: Uuid::new_v4(),
            title: title.into(),
            company: company.into(),
            description: "desc".into(),
            location: "Pune".into(),
            mode: "Remote".into(),
            internship_type: "Summer".into(),
            stipend: None,
            eligibility: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            deadline: now + Duration::days(10),
            status: InternshipStatus::Open,
            posted_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn search_matches_title_company_and_tags_case_insensitively() {
        let i = internship("Backend Intern", "Acme Corp", &["Rust", "Postgres"]);
        assert!(i.matches_search("backend"));
        assert!(i.matches_search("ACME"));
        assert!(i.matches_search("rus"));
        assert!(i.matches_search(""));
        assert!(i.matches_search("   "));
        assert!(!i.matches_search("frontend"));
    }

    #[test]
    fn filter_keeps_listing_order() {
        let items = vec![
            internship("Data Intern", "Zeta", &["python"]),
            internship("Web Intern", "Data Works", &[]),
            internship("Ops Intern", "Acme", &["k8s"]),
        ];
        let titles: Vec<_> = filter_internships(&items, "data")
            .into_iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Data Intern", "Web Intern"]);
    }

    #[test]
    fn days_left_rounds_up() {
        let mut i = internship("A", "B", &[]);
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        i.deadline = now + Duration::hours(25);
        assert_eq!(i.days_until_deadline(now), 2);
        assert_eq!(i.deadline_label(now), "2 days left");

        i.deadline = now + Duration::hours(3);
        assert_eq!(i.deadline_label(now), "1 day left");
    }

    #[test]
    fn deadline_today_when_not_ahead() {
        let mut i = internship("A", "B", &[]);
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        i.deadline = now;
        assert_eq!(i.days_until_deadline(now), 0);
        assert_eq!(i.deadline_label(now), "Deadline today");

        i.deadline = now - Duration::hours(5);
        assert_eq!(i.days_until_deadline(now), 0);
        assert_eq!(i.deadline_label(now), "Deadline today");
    }

    #[test]
    fn accepting_requires_open_and_future_deadline() {
        let mut i = internship("A", "B", &[]);
        let now = i.created_at;
        assert!(i.is_accepting(now));
        i.status = InternshipStatus::Closed;
        assert!(!i.is_accepting(now));
        i.status = InternshipStatus::Open;
        i.deadline = now - Duration::seconds(1);
        assert!(!i.is_accepting(now));
    }

    #[test]
    fn status_parses_and_rejects_unknown() {
        assert_eq!(InternshipStatus::parse("Open"), Ok(InternshipStatus::Open));
        assert_eq!(InternshipStatus::parse("draft"), Ok(InternshipStatus::Draft));
        assert!(InternshipStatus::parse("archived").is_err());
    }

    #[test]
    fn tags_are_split_and_trimmed() {
        assert_eq!(parse_tags(" rust, web ,,ml "), vec!["rust", "web", "ml"]);
        assert!(parse_tags("").is_empty());
    }
}
