use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::common::{normalize, ParseEnumError};

/// Review state of a student's application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    UnderReview,
    Selected,
    Rejected,
}

pub const ALL_APPLICATION_STATUSES: &[ApplicationStatus] = &[
    ApplicationStatus::Submitted,
    ApplicationStatus::UnderReview,
    ApplicationStatus::Selected,
    ApplicationStatus::Rejected,
];

impl ApplicationStatus {
    pub fn parse(s: &str) -> Result<Self, ParseEnumError> {
        match normalize(s).as_str() {
            "submitted" => Ok(ApplicationStatus::Submitted),
            "under_review" => Ok(ApplicationStatus::UnderReview),
            "selected" => Ok(ApplicationStatus::Selected),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(ParseEnumError::new("application status", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Selected => "Selected",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Still awaiting a final decision.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Submitted | ApplicationStatus::UnderReview
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// A student's application to an internship.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Application {
    pub id: Uuid,
    pub internship_id: Uuid,
    pub student_id: Uuid,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application joined with the internship and applicant names for listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub internship_id: Uuid,
    pub internship_title: String,
    pub company: String,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub resume_url: Option<String>,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Request body for applying to an internship.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct ApplyRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 5000, message = "Cover letter is too long"))
    )]
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[cfg_attr(feature = "validation", validate(url(message = "Resume link must be a URL")))]
    #[serde(default)]
    pub resume_url: Option<String>,
}

/// Request body for an admin status change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

/// Count applications still awaiting a decision.
pub fn count_active(applications: &[ApplicationSummary]) -> usize {
    applications.iter().filter(|a| a.status.is_active()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::UnderReview).unwrap(),
            r#""under_review""#
        );
        let s: ApplicationStatus = serde_json::from_str(r#""selected""#).unwrap();
        assert_eq!(s, ApplicationStatus::Selected);
    }

    #[test]
    fn parse_matches_storage_form() {
        for status in ALL_APPLICATION_STATUSES {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Ok(*status));
        }
        assert!(ApplicationStatus::parse("withdrawn").is_err());
    }

    #[test]
    fn only_undecided_statuses_are_active() {
        assert!(ApplicationStatus::Submitted.is_active());
        assert!(ApplicationStatus::UnderReview.is_active());
        assert!(!ApplicationStatus::Selected.is_active());
        assert!(!ApplicationStatus::Rejected.is_active());
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(ApplicationStatus::UnderReview.label(), "Under Review");
    }
}
