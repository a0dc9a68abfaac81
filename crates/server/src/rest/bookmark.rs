use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use shared_types::{AppError, BookmarkToggle, Internship};

use crate::auth::extractors::StudentOnly;
use crate::repo::bookmark;

#[utoipa::path(
    post,
    path = "/api/v1/internships/{id}/bookmark",
    params(("id" = Uuid, Path, description = "Internship id")),
    responses(
        (status = 200, description = "Bookmark added or removed", body = BookmarkToggle),
        (status = 404, description = "Internship not found", body = AppError)
    ),
    tag = "bookmarks"
)]
#[tracing::instrument(skip(pool, student))]
pub async fn toggle(
    State(pool): State<Pool<Postgres>>,
    student: StudentOnly,
    Path(id): Path<Uuid>,
) -> Result<Json<BookmarkToggle>, AppError> {
    Ok(Json(bookmark::toggle(&pool, student.0.id, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookmarks",
    responses(
        (status = 200, description = "Bookmarked internships, most recent first", body = Vec<Internship>)
    ),
    tag = "bookmarks"
)]
#[tracing::instrument(skip(pool, student))]
pub async fn list(
    State(pool): State<Pool<Postgres>>,
    student: StudentOnly,
) -> Result<Json<Vec<Internship>>, AppError> {
    Ok(Json(bookmark::list_internships(&pool, student.0.id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookmarks/ids",
    responses(
        (status = 200, description = "Bookmarked internship ids", body = Vec<Uuid>)
    ),
    tag = "bookmarks"
)]
#[tracing::instrument(skip(pool, student))]
pub async fn list_ids(
    State(pool): State<Pool<Postgres>>,
    student: StudentOnly,
) -> Result<Json<Vec<Uuid>>, AppError> {
    Ok(Json(bookmark::list_ids(&pool, student.0.id).await?))
}
