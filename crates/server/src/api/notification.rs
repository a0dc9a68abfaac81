use dioxus::prelude::*;
use shared_types::{MessageResponse, Notification, UnreadCount};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

/// The caller's notifications, newest first.
#[server]
pub async fn notifications() -> Result<Vec<Notification>, ServerFnError> {
    use crate::repo::notification;

    let claims = super::auth::require_auth()?;
    let pool = super::auth::pool().await?;
    notification::list_for_user(pool, claims.sub)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn mark_notification_read(id: Uuid) -> Result<MessageResponse, ServerFnError> {
    use crate::repo::notification;
    use shared_types::AppError;

    let claims = super::auth::require_auth()?;
    let pool = super::auth::pool().await?;
    let updated = notification::mark_read(pool, id, claims.sub)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    if !updated {
        return Err(AppError::not_found("Notification not found").into_server_fn_error());
    }
    Ok(MessageResponse {
        message: "Marked as read".to_string(),
    })
}

#[server]
pub async fn mark_all_notifications_read() -> Result<MessageResponse, ServerFnError> {
    use crate::repo::notification;

    let claims = super::auth::require_auth()?;
    let pool = super::auth::pool().await?;
    let count = notification::mark_all_read(pool, claims.sub)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    Ok(MessageResponse {
        message: format!("{count} marked as read"),
    })
}

/// Unread count for the navbar badge.
#[server]
pub async fn unread_notification_count() -> Result<UnreadCount, ServerFnError> {
    use crate::repo::notification;

    let claims = super::auth::require_auth()?;
    let pool = super::auth::pool().await?;
    let unread = notification::unread_count(pool, claims.sub)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    Ok(UnreadCount { unread })
}
