use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use shared_types::{AppError, MessageResponse, Notification, UnreadCount};

use crate::auth::extractors::AuthRequired;
use crate::repo::notification;

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "The caller's notifications, newest first", body = Vec<Notification>)
    ),
    tag = "notifications"
)]
#[tracing::instrument(skip(pool, caller))]
pub async fn list(
    State(pool): State<Pool<Postgres>>,
    caller: AuthRequired,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(notification::list_for_user(&pool, caller.0.sub).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    responses(
        (status = 200, description = "Unread notifications", body = UnreadCount)
    ),
    tag = "notifications"
)]
#[tracing::instrument(skip(pool, caller))]
pub async fn unread_count(
    State(pool): State<Pool<Postgres>>,
    caller: AuthRequired,
) -> Result<Json<UnreadCount>, AppError> {
    let unread = notification::unread_count(&pool, caller.0.sub).await?;
    Ok(Json(UnreadCount { unread }))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Marked as read", body = MessageResponse),
        (status = 404, description = "Not the caller's notification", body = AppError)
    ),
    tag = "notifications"
)]
#[tracing::instrument(skip(pool, caller))]
pub async fn mark_read(
    State(pool): State<Pool<Postgres>>,
    caller: AuthRequired,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !notification::mark_read(&pool, id, caller.0.sub).await? {
        return Err(AppError::not_found("Notification not found"));
    }
    Ok(Json(MessageResponse {
        message: "Marked as read".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/read-all",
    responses(
        (status = 200, description = "All marked as read", body = MessageResponse)
    ),
    tag = "notifications"
)]
#[tracing::instrument(skip(pool, caller))]
pub async fn mark_all_read(
    State(pool): State<Pool<Postgres>>,
    caller: AuthRequired,
) -> Result<Json<MessageResponse>, AppError> {
    let count = notification::mark_all_read(&pool, caller.0.sub).await?;
    Ok(Json(MessageResponse {
        message: format!("{count} marked as read"),
    }))
}
