use chrono::Utc;
use shared_types::{
    AppError, Application, ApplicationStatus, ApplicationSummary, ApplyRequest, NewNotification,
    NotificationType,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;
use crate::repo::{internship, notification};

const COLUMNS: &str =
    "id, internship_id, student_id, cover_letter, resume_url, status, applied_at, updated_at";

const SUMMARY_SELECT: &str = r#"
    SELECT a.id, a.internship_id, i.title AS internship_title, i.company,
           a.student_id, p.full_name AS student_name, p.email AS student_email,
           a.resume_url, a.status, a.applied_at
    FROM applications a
    JOIN internships i ON i.id = a.internship_id
    JOIN profiles p ON p.id = a.student_id
"#;

/// Apply to an internship that is still accepting applications. A second
/// application by the same student is a conflict.
pub async fn create(
    pool: &Pool<Postgres>,
    internship_id: Uuid,
    student_id: Uuid,
    req: &ApplyRequest,
) -> Result<Application, AppError> {
    let target = internship::find_by_id(pool, internship_id)
        .await?
        .ok_or_else(|| AppError::not_found("Internship not found"))?;
    if !target.is_accepting(Utc::now()) {
        return Err(AppError::bad_request(
            "This internship is no longer accepting applications",
        ));
    }

    sqlx::query_as::<_, Application>(&format!(
        r#"
        INSERT INTO applications (internship_id, student_id, cover_letter, resume_url)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(internship_id)
    .bind(student_id)
    .bind(req.cover_letter.as_deref().filter(|s| !s.trim().is_empty()))
    .bind(req.resume_url.as_deref().filter(|s| !s.trim().is_empty()))
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_for_student(
    pool: &Pool<Postgres>,
    internship_id: Uuid,
    student_id: Uuid,
) -> Result<Option<Application>, AppError> {
    sqlx::query_as::<_, Application>(&format!(
        "SELECT {COLUMNS} FROM applications WHERE internship_id = $1 AND student_id = $2"
    ))
    .bind(internship_id)
    .bind(student_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// A student's applications, newest first.
pub async fn list_for_student(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<Vec<ApplicationSummary>, AppError> {
    sqlx::query_as::<_, ApplicationSummary>(&format!(
        "{SUMMARY_SELECT} WHERE a.student_id = $1 ORDER BY a.applied_at DESC"
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// All applications for admin review, optionally narrowed to one status.
pub async fn list_all(
    pool: &Pool<Postgres>,
    status: Option<ApplicationStatus>,
) -> Result<Vec<ApplicationSummary>, AppError> {
    sqlx::query_as::<_, ApplicationSummary>(&format!(
        "{SUMMARY_SELECT} WHERE ($1::TEXT IS NULL OR a.status = $1) ORDER BY a.applied_at DESC"
    ))
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Change an application's status and tell the student, atomically. Setting
/// the status it already has is a no-op without a notification.
pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<Application, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let previous: String = sqlx::query_scalar("SELECT status FROM applications WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .ok_or_else(|| AppError::not_found("Application not found"))?;

    let updated = sqlx::query_as::<_, Application>(&format!(
        "UPDATE applications SET status = $2, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    if previous != status.as_str() {
        let title: String = sqlx::query_scalar("SELECT title FROM internships WHERE id = $1")
            .bind(updated.internship_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(SqlxErrorExt::into_app_error)?;
        notification::insert(
            &mut *tx,
            updated.student_id,
            &NewNotification {
                title: "Application status updated".to_string(),
                message: format!("Your application for {title} is now {}", status.label()),
                kind: NotificationType::StatusUpdate,
                link: Some("/student/applications".to_string()),
            },
        )
        .await?;
    }

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(updated)
}

/// Applications still awaiting a decision.
pub async fn count_active_for_student(pool: &Pool<Postgres>, student_id: Uuid) -> Result<i64, AppError> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM applications WHERE student_id = $1 AND status IN ('submitted', 'under_review')",
    )
    .bind(student_id)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
