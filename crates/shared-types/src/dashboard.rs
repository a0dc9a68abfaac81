use serde::{Deserialize, Serialize};

use crate::{AlumniPost, Internship, PostCounts};

/// Student dashboard tiles plus the newest openings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentDashboard {
    pub applications: i64,
    pub bookmarks: i64,
    pub upcoming_internships: i64,
    pub recent_internships: Vec<Internship>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlumniDashboard {
    pub counts: PostCounts,
    pub recent_posts: Vec<AlumniPost>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct AdminDashboard {
    pub internships: i64,
    pub applications: i64,
    pub pending_posts: i64,
    pub users: i64,
}

/// Number of recent openings on the student dashboard.
pub const STUDENT_RECENT_LIMIT: i64 = 3;
/// Number of recent posts on the alumni dashboard.
pub const ALUMNI_RECENT_LIMIT: i64 = 5;
