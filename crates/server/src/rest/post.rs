use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use shared_types::{AlumniPost, AppError, MessageResponse, PostRequest};

use crate::auth::extractors::{AdminOnly, AlumniOnly};
use crate::error_convert::ValidateRequest;
use crate::repo::post;

#[utoipa::path(
    get,
    path = "/api/v1/posts/mine",
    responses(
        (status = 200, description = "The alumnus' posts, newest first", body = Vec<AlumniPost>)
    ),
    tag = "posts"
)]
#[tracing::instrument(skip(pool, alumni))]
pub async fn list_mine(
    State(pool): State<Pool<Postgres>>,
    alumni: AlumniOnly,
) -> Result<Json<Vec<AlumniPost>>, AppError> {
    Ok(Json(post::list_by_alumni(&pool, alumni.0.id, None).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post submitted for approval", body = AlumniPost),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "posts"
)]
#[tracing::instrument(skip(pool, alumni, payload))]
pub async fn create_post(
    State(pool): State<Pool<Postgres>>,
    alumni: AlumniOnly,
    Json(payload): Json<PostRequest>,
) -> Result<(StatusCode, Json<AlumniPost>), AppError> {
    payload.validate_request()?;
    let created = post::create(&pool, alumni.0.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated and returned to pending", body = AlumniPost),
        (status = 404, description = "No such post owned by the caller", body = AppError)
    ),
    tag = "posts"
)]
#[tracing::instrument(skip(pool, alumni, payload))]
pub async fn update_post(
    State(pool): State<Pool<Postgres>>,
    alumni: AlumniOnly,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostRequest>,
) -> Result<Json<AlumniPost>, AppError> {
    payload.validate_request()?;
    Ok(Json(post::update(&pool, id, alumni.0.id, &payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/pending",
    responses(
        (status = 200, description = "Posts awaiting approval, oldest first", body = Vec<AlumniPost>)
    ),
    tag = "posts"
)]
#[tracing::instrument(skip(pool, _admin))]
pub async fn list_pending(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
) -> Result<Json<Vec<AlumniPost>>, AppError> {
    Ok(Json(post::list_pending(&pool).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/approve",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post approved; the author is notified", body = AlumniPost),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "posts"
)]
#[tracing::instrument(skip(pool, _admin))]
pub async fn approve_post(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<AlumniPost>, AppError> {
    Ok(Json(post::approve(&pool, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "posts"
)]
#[tracing::instrument(skip(pool, _admin))]
pub async fn delete_post(
    State(pool): State<Pool<Postgres>>,
    _admin: AdminOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !post::delete(&pool, id).await? {
        return Err(AppError::not_found("Post not found"));
    }
    Ok(Json(MessageResponse {
        message: "Post deleted".to_string(),
    }))
}
