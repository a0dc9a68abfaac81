use shared_types::{AppError, Feedback, FeedbackRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = "id, user_id, rating, comment, created_at";

pub async fn create(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    req: &FeedbackRequest,
) -> Result<Feedback, AppError> {
    sqlx::query_as::<_, Feedback>(&format!(
        "INSERT INTO feedback (user_id, rating, comment) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
    ))
    .bind(user_id)
    .bind(req.rating)
    .bind(req.comment.as_deref().map(str::trim).filter(|c| !c.is_empty()))
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Newest first.
pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Feedback>, AppError> {
    sqlx::query_as::<_, Feedback>(&format!(
        "SELECT {COLUMNS} FROM feedback ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
