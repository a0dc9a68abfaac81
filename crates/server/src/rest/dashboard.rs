use axum::{extract::State, Json};
use sqlx::{Pool, Postgres};

use shared_types::{AdminDashboard, AlumniDashboard, AppError, StudentDashboard};

use crate::auth::extractors::{AdminOnly, AlumniOnly, StudentOnly};
use crate::repo::stats;

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/student",
    responses((status = 200, description = "Student dashboard", body = StudentDashboard)),
    tag = "dashboard"
)]
#[tracing::instrument(skip(pool, student))]
pub async fn student(
    State(pool): State<Pool<Postgres>>,
    student: StudentOnly,
) -> Result<Json<StudentDashboard>, AppError> {
    Ok(Json(stats::student_dashboard(&pool, student.0.id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/alumni",
    responses((status = 200, description = "Alumni dashboard", body = AlumniDashboard)),
    tag = "dashboard"
)]
#[tracing::instrument(skip(pool, alumni))]
pub async fn alumni(
    State(pool): State<Pool<Postgres>>,
    alumni: AlumniOnly,
) -> Result<Json<AlumniDashboard>, AppError> {
    Ok(Json(stats::alumni_dashboard(&pool, alumni.0.id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/admin",
    responses((status = 200, description = "Site-wide totals", body = AdminDashboard)),
    tag = "dashboard"
)]
#[tracing::instrument(skip(pool, _admin))]
pub async fn admin(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
) -> Result<Json<AdminDashboard>, AppError> {
    Ok(Json(stats::admin_dashboard(&pool).await?))
}
