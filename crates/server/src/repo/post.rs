use shared_types::{
    AlumniPost, AppError, NewNotification, NotificationType, PostCounts, PostRequest,
};
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;
use crate::repo::notification;

const COLUMNS: &str = "id, alumni_id, company, job_role, content, difficulty_rating, rounds, tips, \
     approved, posted_at, updated_at";

pub async fn create(
    pool: &Pool<Postgres>,
    alumni_id: Uuid,
    req: &PostRequest,
) -> Result<AlumniPost, AppError> {
    sqlx::query_as::<_, AlumniPost>(&format!(
        r#"
        INSERT INTO alumni_posts (alumni_id, company, job_role, content, difficulty_rating, rounds, tips)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(alumni_id)
    .bind(req.company.trim())
    .bind(req.job_role.trim())
    .bind(&req.content)
    .bind(req.difficulty_rating)
    .bind(Json(&req.rounds))
    .bind(&req.tips)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Edit a post owned by `alumni_id`. Edited posts go back to pending.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    alumni_id: Uuid,
    req: &PostRequest,
) -> Result<AlumniPost, AppError> {
    sqlx::query_as::<_, AlumniPost>(&format!(
        r#"
        UPDATE alumni_posts
        SET company = $3, job_role = $4, content = $5, difficulty_rating = $6,
            rounds = $7, tips = $8, approved = FALSE, updated_at = now()
        WHERE id = $1 AND alumni_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(alumni_id)
    .bind(req.company.trim())
    .bind(req.job_role.trim())
    .bind(&req.content)
    .bind(req.difficulty_rating)
    .bind(Json(&req.rounds))
    .bind(&req.tips)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Post not found"))
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<AlumniPost>, AppError> {
    sqlx::query_as::<_, AlumniPost>(&format!("SELECT {COLUMNS} FROM alumni_posts WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// An alumnus' posts, newest first, optionally capped.
pub async fn list_by_alumni(
    pool: &Pool<Postgres>,
    alumni_id: Uuid,
    limit: Option<i64>,
) -> Result<Vec<AlumniPost>, AppError> {
    sqlx::query_as::<_, AlumniPost>(&format!(
        r#"
        SELECT {COLUMNS} FROM alumni_posts
        WHERE alumni_id = $1
        ORDER BY posted_at DESC
        LIMIT $2
        "#
    ))
    .bind(alumni_id)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Posts awaiting approval, oldest first.
pub async fn list_pending(pool: &Pool<Postgres>) -> Result<Vec<AlumniPost>, AppError> {
    sqlx::query_as::<_, AlumniPost>(&format!(
        "SELECT {COLUMNS} FROM alumni_posts WHERE NOT approved ORDER BY posted_at ASC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Approve a post and notify its author in the same transaction.
pub async fn approve(pool: &Pool<Postgres>, id: Uuid) -> Result<AlumniPost, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let post = sqlx::query_as::<_, AlumniPost>(&format!(
        r#"
        UPDATE alumni_posts SET approved = TRUE, updated_at = now()
        WHERE id = $1 AND NOT approved
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let Some(post) = post else {
        tx.rollback().await.map_err(SqlxErrorExt::into_app_error)?;
        // Already approved posts are returned unchanged.
        return find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"));
    };

    notification::insert(
        &mut *tx,
        post.alumni_id,
        &NewNotification {
            title: "Post approved".to_string(),
            message: format!(
                "Your {} experience at {} is now visible to students",
                post.job_role, post.company
            ),
            kind: NotificationType::PostApproved,
            link: Some("/alumni/posts".to_string()),
        },
    )
    .await?;

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(post)
}

pub async fn delete(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM alumni_posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}

pub async fn counts_for_alumni(pool: &Pool<Postgres>, alumni_id: Uuid) -> Result<PostCounts, AppError> {
    let (total, approved): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COUNT(*) FILTER (WHERE approved)
        FROM alumni_posts WHERE alumni_id = $1
        "#,
    )
    .bind(alumni_id)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(PostCounts {
        total,
        approved,
        pending: total - approved,
    })
}
