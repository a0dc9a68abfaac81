use shared_types::{AppError, NewNotification, Notification, Role};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = "id, user_id, title, message, kind, link, is_read, created_at";

/// Insert one notification. Takes a connection so callers can include it
/// in the transaction that caused it.
pub async fn insert(
    conn: &mut PgConnection,
    user_id: Uuid,
    new: &NewNotification,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO notifications (user_id, title, message, kind, link) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(&new.title)
    .bind(&new.message)
    .bind(new.kind.as_str())
    .bind(new.link.as_deref())
    .execute(conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Fan a notification out to every profile with `role`. Returns the number
/// of rows written.
pub async fn insert_for_role(
    conn: &mut PgConnection,
    role: Role,
    new: &NewNotification,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO notifications (user_id, title, message, kind, link)
        SELECT id, $2, $3, $4, $5 FROM profiles WHERE role = $1
        "#,
    )
    .bind(role.as_str())
    .bind(&new.title)
    .bind(&new.message)
    .bind(new.kind.as_str())
    .bind(new.link.as_deref())
    .execute(conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected())
}

/// Newest first.
pub async fn list_for_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Vec<Notification>, AppError> {
    sqlx::query_as::<_, Notification>(&format!(
        "SELECT {COLUMNS} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Mark one of the user's notifications read. `false` if it is not theirs.
pub async fn mark_read(pool: &Pool<Postgres>, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() == 1)
}

pub async fn mark_all_read(pool: &Pool<Postgres>, user_id: Uuid) -> Result<u64, AppError> {
    let result =
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND NOT is_read")
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected())
}

pub async fn unread_count(pool: &Pool<Postgres>, user_id: Uuid) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
