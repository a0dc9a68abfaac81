use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student's saved internship.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Bookmark {
    pub id: Uuid,
    pub internship_id: Uuid,
    pub student_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Result of toggling a bookmark.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookmarkToggle {
    pub internship_id: Uuid,
    pub bookmarked: bool,
}

impl BookmarkToggle {
    /// Toast title and body shown after the toggle.
    pub fn toast_text(&self) -> (&'static str, &'static str) {
        if self.bookmarked {
            ("Bookmarked!", "Internship added to bookmarks")
        } else {
            ("Bookmark removed", "Internship removed from bookmarks")
        }
    }
}
