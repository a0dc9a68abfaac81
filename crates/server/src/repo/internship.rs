use chrono::{DateTime, Utc};
use shared_types::{
    AppError, CreateInternshipRequest, Internship, InternshipStatus, NewNotification,
    NotificationType, Role,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;
use crate::repo::notification;

pub(crate) const COLUMNS: &str = "id, title, company, description, location, mode, internship_type, \
     stipend, eligibility, tags, deadline, status, posted_by, created_at, updated_at";

/// Openings students can still apply to, soonest deadline first.
pub async fn list_open(pool: &Pool<Postgres>, now: DateTime<Utc>) -> Result<Vec<Internship>, AppError> {
    sqlx::query_as::<_, Internship>(&format!(
        r#"
        SELECT {COLUMNS} FROM internships
        WHERE status = 'open' AND deadline >= $1
        ORDER BY deadline ASC
        "#
    ))
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Every internship regardless of status, newest first.
pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Internship>, AppError> {
    sqlx::query_as::<_, Internship>(&format!(
        "SELECT {COLUMNS} FROM internships ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Most recently posted open internships.
pub async fn recent_open(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<Internship>, AppError> {
    sqlx::query_as::<_, Internship>(&format!(
        r#"
        SELECT {COLUMNS} FROM internships
        WHERE status = 'open'
        ORDER BY created_at DESC
        LIMIT $1
        "#
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Internship>, AppError> {
    sqlx::query_as::<_, Internship>(&format!("SELECT {COLUMNS} FROM internships WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Insert an internship. When it is posted as open, every student gets a
/// `new_internship` notification in the same transaction.
pub async fn create(
    pool: &Pool<Postgres>,
    posted_by: Uuid,
    req: &CreateInternshipRequest,
) -> Result<Internship, AppError> {
    let status = req.status.unwrap_or_default();
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let internship = sqlx::query_as::<_, Internship>(&format!(
        r#"
        INSERT INTO internships
            (title, company, description, location, mode, internship_type,
             stipend, eligibility, tags, deadline, status, posted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(req.title.trim())
    .bind(req.company.trim())
    .bind(&req.description)
    .bind(req.location.trim())
    .bind(req.mode.trim())
    .bind(req.internship_type.trim())
    .bind(req.stipend.as_deref())
    .bind(req.eligibility.as_deref())
    .bind(&req.tags)
    .bind(req.deadline)
    .bind(status.as_str())
    .bind(posted_by)
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    if status == InternshipStatus::Open {
        let notified = notification::insert_for_role(
            &mut *tx,
            Role::Student,
            &NewNotification {
                title: "New internship posted".to_string(),
                message: format!("{} is hiring: {}", internship.company, internship.title),
                kind: NotificationType::NewInternship,
                link: Some(format!("/student/internships/{}", internship.id)),
            },
        )
        .await?;
        tracing::info!(internship_id = %internship.id, notified, "students notified of new internship");
    }

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(internship)
}

pub async fn set_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: InternshipStatus,
) -> Result<Internship, AppError> {
    sqlx::query_as::<_, Internship>(&format!(
        "UPDATE internships SET status = $2, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Internship not found"))
}

/// Open internships whose deadline has not passed.
pub async fn count_upcoming(pool: &Pool<Postgres>, now: DateTime<Utc>) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM internships WHERE status = 'open' AND deadline >= $1")
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
