use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::common::{normalize, ParseEnumError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum NotificationType {
    NewInternship,
    DeadlineAlert,
    StatusUpdate,
    PostApproved,
    #[default]
    General,
}

impl NotificationType {
    pub fn parse(s: &str) -> Result<Self, ParseEnumError> {
        match normalize(s).as_str() {
            "new_internship" => Ok(NotificationType::NewInternship),
            "deadline_alert" => Ok(NotificationType::DeadlineAlert),
            "status_update" => Ok(NotificationType::StatusUpdate),
            "post_approved" => Ok(NotificationType::PostApproved),
            "general" => Ok(NotificationType::General),
            _ => Err(ParseEnumError::new("notification type", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::NewInternship => "new_internship",
            NotificationType::DeadlineAlert => "deadline_alert",
            NotificationType::StatusUpdate => "status_update",
            NotificationType::PostApproved => "post_approved",
            NotificationType::General => "general",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for NotificationType {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[cfg_attr(feature = "server", sqlx(try_from = "String"))]
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// In-app path to open when the notification is clicked.
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A notification about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationType,
    pub link: Option<String>,
}

/// Unread badge text. `None` hides the badge.
pub fn unread_badge_label(count: i64) -> Option<String> {
    match count {
        c if c <= 0 => None,
        c if c > 9 => Some("9+".to_string()),
        c => Some(c.to_string()),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UnreadCount {
    pub unread: i64,
}

/// Mark one notification read in a local list, as the page does after a
/// successful server call.
pub fn mark_read_locally(items: &mut [Notification], id: Uuid) {
    if let Some(n) = items.iter_mut().find(|n| n.id == id) {
        n.is_read = true;
    }
}

pub fn mark_all_read_locally(items: &mut [Notification]) {
    items.iter_mut().for_each(|n| n.is_read = true);
}
