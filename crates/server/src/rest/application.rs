use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use shared_types::{
    AppError, Application, ApplicationStatus, ApplicationSummary, ApplyRequest,
    UpdateApplicationStatusRequest,
};

use crate::auth::extractors::{AdminOnly, StudentOnly};
use crate::error_convert::ValidateRequest;
use crate::repo::application;

#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ApplicationListParams {
    /// Only applications in this status.
    pub status: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/internships/{id}/applications",
    params(("id" = Uuid, Path, description = "Internship id")),
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Internship closed or past deadline", body = AppError),
        (status = 409, description = "Already applied", body = AppError)
    ),
    tag = "applications"
)]
#[tracing::instrument(skip(pool, student, payload))]
pub async fn apply(
    State(pool): State<Pool<Postgres>>,
    student: StudentOnly,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    payload.validate_request()?;
    let created = application::create(&pool, id, student.0.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/mine",
    responses(
        (status = 200, description = "The student's applications, newest first", body = Vec<ApplicationSummary>)
    ),
    tag = "applications"
)]
#[tracing::instrument(skip(pool, student))]
pub async fn list_mine(
    State(pool): State<Pool<Postgres>>,
    student: StudentOnly,
) -> Result<Json<Vec<ApplicationSummary>>, AppError> {
    Ok(Json(application::list_for_student(&pool, student.0.id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications",
    params(ApplicationListParams),
    responses(
        (status = 200, description = "All applications", body = Vec<ApplicationSummary>),
        (status = 400, description = "Unknown status filter", body = AppError)
    ),
    tag = "applications"
)]
#[tracing::instrument(skip(pool, _admin))]
pub async fn list_all(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
    Query(params): Query<ApplicationListParams>,
) -> Result<Json<Vec<ApplicationSummary>>, AppError> {
    let status = params
        .status
        .as_deref()
        .map(ApplicationStatus::parse)
        .transpose()
        .map_err(|e| AppError::bad_request(e.to_string()))?;
    Ok(Json(application::list_all(&pool, status).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application id")),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Status updated; the student is notified on change", body = Application),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "applications"
)]
#[tracing::instrument(skip(pool, _admin, payload))]
pub async fn update_status(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusRequest>,
) -> Result<Json<Application>, AppError> {
    Ok(Json(application::update_status(&pool, id, payload.status).await?))
}
