use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stage of an interview process described in an alumni post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InterviewRound {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// An alumni interview-experience post. Hidden from students until approved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct AlumniPost {
    pub id: Uuid,
    pub alumni_id: Uuid,
    pub company: String,
    pub job_role: String,
    pub content: String,
    /// 1 (easy) to 5 (hard).
    pub difficulty_rating: Option<i32>,
    #[serde(default)]
    #[cfg_attr(feature = "server", sqlx(json))]
    pub rounds: Vec<InterviewRound>,
    #[serde(default)]
    pub tips: Vec<String>,
    pub approved: bool,
    pub posted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlumniPost {
    pub fn approval_label(&self) -> &'static str {
        if self.approved {
            "Approved"
        } else {
            "Pending"
        }
    }

    pub fn difficulty_label(&self) -> Option<String> {
        self.difficulty_rating.map(|d| format!("Difficulty: {d}/5"))
    }
}

/// Create or edit body for an alumni post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct PostRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Company is required"))
    )]
    pub company: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Role is required"))
    )]
    pub job_role: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 20, message = "Share at least a few sentences"))
    )]
    pub content: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 5, message = "Difficulty must be between 1 and 5"))
    )]
    #[serde(default)]
    pub difficulty_rating: Option<i32>,
    #[serde(default)]
    pub rounds: Vec<InterviewRound>,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Approved / pending tallies over a set of posts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PostCounts {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
}

impl PostCounts {
    pub fn tally(posts: &[AlumniPost]) -> Self {
        let approved = posts.iter().filter(|p| p.approved).count() as i64;
        let total = posts.len() as i64;
        Self {
            total,
            approved,
            pending: total - approved,
        }
    }
}

/// Parse one-per-line tips, dropping blank lines.
pub fn parse_tips(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
