use shared_types::{AppError, BookmarkToggle, Internship};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;
use crate::repo::internship;

/// Remove the bookmark if present, otherwise add it.
pub async fn toggle(
    pool: &Pool<Postgres>,
    student_id: Uuid,
    internship_id: Uuid,
) -> Result<BookmarkToggle, AppError> {
    let removed = sqlx::query("DELETE FROM bookmarks WHERE student_id = $1 AND internship_id = $2")
        .bind(student_id)
        .bind(internship_id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .rows_affected();

    if removed > 0 {
        return Ok(BookmarkToggle {
            internship_id,
            bookmarked: false,
        });
    }

    sqlx::query(
        r#"
        INSERT INTO bookmarks (student_id, internship_id) VALUES ($1, $2)
        ON CONFLICT (internship_id, student_id) DO NOTHING
        "#,
    )
    .bind(student_id)
    .bind(internship_id)
    .execute(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(BookmarkToggle {
        internship_id,
        bookmarked: true,
    })
}

pub async fn list_ids(pool: &Pool<Postgres>, student_id: Uuid) -> Result<Vec<Uuid>, AppError> {
    sqlx::query_scalar("SELECT internship_id FROM bookmarks WHERE student_id = $1")
        .bind(student_id)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Bookmarked internships, most recently saved first.
pub async fn list_internships(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<Vec<Internship>, AppError> {
    let columns = internship::COLUMNS
        .split(", ")
        .map(|c| format!("i.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ");
    sqlx::query_as::<_, Internship>(&format!(
        r#"
        SELECT {columns}
        FROM bookmarks b
        JOIN internships i ON i.id = b.internship_id
        WHERE b.student_id = $1
        ORDER BY b.created_at DESC
        "#
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn count_for_student(pool: &Pool<Postgres>, student_id: Uuid) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM bookmarks WHERE student_id = $1")
        .bind(student_id)
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
