use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use shared_types::{AppError, CreateInternshipRequest, Internship, InternshipStatus};

use crate::auth::extractors::{AdminOnly, AuthRequired};
use crate::error_convert::ValidateRequest;
use crate::repo::internship;

#[utoipa::path(
    get,
    path = "/api/v1/internships",
    responses(
        (status = 200, description = "Open internships, soonest deadline first", body = Vec<Internship>)
    ),
    tag = "internships"
)]
#[tracing::instrument(skip(pool, _auth))]
pub async fn list_open(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
) -> Result<Json<Vec<Internship>>, AppError> {
    Ok(Json(internship::list_open(&pool, Utc::now()).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/internships/all",
    responses(
        (status = 200, description = "Every internship, newest first", body = Vec<Internship>),
        (status = 403, description = "Admin only", body = AppError)
    ),
    tag = "internships"
)]
#[tracing::instrument(skip(pool, _admin))]
pub async fn list_all(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
) -> Result<Json<Vec<Internship>>, AppError> {
    Ok(Json(internship::list_all(&pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/internships/{id}",
    params(("id" = Uuid, Path, description = "Internship id")),
    responses(
        (status = 200, description = "Internship", body = Internship),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "internships"
)]
#[tracing::instrument(skip(pool, _auth))]
pub async fn get_internship(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<Uuid>,
) -> Result<Json<Internship>, AppError> {
    internship::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Internship not found"))
}

#[utoipa::path(
    post,
    path = "/api/v1/internships",
    request_body = CreateInternshipRequest,
    responses(
        (status = 201, description = "Internship created; students are notified when open", body = Internship),
        (status = 403, description = "Admin only", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "internships"
)]
#[tracing::instrument(skip(pool, admin, payload))]
pub async fn create_internship(
    State(pool): State<Pool<Postgres>>,
    admin: AdminOnly,
    Json(payload): Json<CreateInternshipRequest>,
) -> Result<(StatusCode, Json<Internship>), AppError> {
    payload.validate_request()?;
    let created = internship::create(&pool, admin.0.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/internships/{id}/close",
    params(("id" = Uuid, Path, description = "Internship id")),
    responses(
        (status = 200, description = "Internship closed", body = Internship),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "internships"
)]
#[tracing::instrument(skip(pool, _admin))]
pub async fn close_internship(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<Internship>, AppError> {
    Ok(Json(
        internship::set_status(&pool, id, InternshipStatus::Closed).await?,
    ))
}
