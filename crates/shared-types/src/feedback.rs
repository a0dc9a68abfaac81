use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct FeedbackRequest {
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))
    )]
    pub rating: i32,
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 2000, message = "Comment is too long"))
    )]
    #[serde(default)]
    pub comment: Option<String>,
}

/// Mean rating rounded to one decimal, `None` for no feedback.
pub fn average_rating(items: &[Feedback]) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    let sum: i64 = items.iter().map(|f| i64::from(f.rating)).sum();
    let mean = sum as f64 / items.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(rating: i32) -> Feedback {
        Feedback {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            rating,
            comment: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn average_of_nothing_is_none() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let items = [feedback(5), feedback(4), feedback(4)];
        assert_eq!(average_rating(&items), Some(4.3));
    }
}
