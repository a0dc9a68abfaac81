use axum::{extract::State, http::StatusCode, Json};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, Feedback, FeedbackRequest};

use crate::auth::extractors::{AdminOnly, AuthRequired};
use crate::error_convert::ValidateRequest;
use crate::repo::feedback;

#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 201, description = "Feedback recorded", body = Feedback),
        (status = 422, description = "Rating outside 1-5", body = AppError)
    ),
    tag = "feedback"
)]
#[tracing::instrument(skip(pool, caller, payload))]
pub async fn submit(
    State(pool): State<Pool<Postgres>>,
    caller: AuthRequired,
    Json(payload): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    payload.validate_request()?;
    let created = feedback::create(&pool, caller.0.sub, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/feedback",
    responses(
        (status = 200, description = "All feedback, newest first", body = Vec<Feedback>)
    ),
    tag = "feedback"
)]
#[tracing::instrument(skip(pool, _admin))]
pub async fn list(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
) -> Result<Json<Vec<Feedback>>, AppError> {
    Ok(Json(feedback::list_all(&pool).await?))
}
