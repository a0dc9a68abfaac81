use chrono::Utc;
use shared_types::{
    AdminDashboard, AlumniDashboard, AppError, StudentDashboard, ALUMNI_RECENT_LIMIT,
    STUDENT_RECENT_LIMIT,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;
use crate::repo::{application, bookmark, internship, post};

pub async fn student_dashboard(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<StudentDashboard, AppError> {
    let now = Utc::now();
    Ok(StudentDashboard {
        applications: application::count_active_for_student(pool, student_id).await?,
        bookmarks: bookmark::count_for_student(pool, student_id).await?,
        upcoming_internships: internship::count_upcoming(pool, now).await?,
        recent_internships: internship::recent_open(pool, STUDENT_RECENT_LIMIT).await?,
    })
}

pub async fn alumni_dashboard(
    pool: &Pool<Postgres>,
    alumni_id: Uuid,
) -> Result<AlumniDashboard, AppError> {
    Ok(AlumniDashboard {
        counts: post::counts_for_alumni(pool, alumni_id).await?,
        recent_posts: post::list_by_alumni(pool, alumni_id, Some(ALUMNI_RECENT_LIMIT)).await?,
    })
}

/// Site-wide totals in one round trip.
pub async fn admin_dashboard(pool: &Pool<Postgres>) -> Result<AdminDashboard, AppError> {
    sqlx::query_as::<_, AdminDashboard>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM internships) AS internships,
            (SELECT COUNT(*) FROM applications) AS applications,
            (SELECT COUNT(*) FROM alumni_posts WHERE NOT approved) AS pending_posts,
            (SELECT COUNT(*) FROM profiles) AS users
        "#,
    )
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
