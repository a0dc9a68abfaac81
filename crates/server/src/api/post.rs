use dioxus::prelude::*;
use shared_types::{AlumniPost, MessageResponse, PostRequest};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};
#[cfg(feature = "server")]
use shared_types::{AppError, Role};

#[server]
pub async fn my_posts() -> Result<Vec<AlumniPost>, ServerFnError> {
    use crate::repo::post;

    let alumni = super::auth::require_role(&[Role::Alumni]).await?;
    let pool = super::auth::pool().await?;
    post::list_by_alumni(pool, alumni.id, None)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

/// A post for editing. Alumni may load only their own; admins any.
#[server]
pub async fn get_post(id: Uuid) -> Result<AlumniPost, ServerFnError> {
    use crate::repo::post;

    let caller = super::auth::require_role(&[Role::Alumni, Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    let found = post::find_by_id(pool, id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?
        .ok_or_else(|| AppError::not_found("Post not found").into_server_fn_error())?;

    if caller.role != Role::Admin && found.alumni_id != caller.id {
        return Err(AppError::not_found("Post not found").into_server_fn_error());
    }
    Ok(found)
}

#[server]
pub async fn create_post(body: PostRequest) -> Result<AlumniPost, ServerFnError> {
    use crate::repo::post;

    body.validate_request().map_err(AppErrorExt::into_server_fn_error)?;
    let alumni = super::auth::require_role(&[Role::Alumni]).await?;
    let pool = super::auth::pool().await?;
    let created = post::create(pool, alumni.id, &body)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    tracing::info!(post_id = %created.id, "alumni post submitted for approval");
    Ok(created)
}

/// Edit an own post. It returns to pending approval.
#[server]
pub async fn update_post(id: Uuid, body: PostRequest) -> Result<AlumniPost, ServerFnError> {
    use crate::repo::post;

    body.validate_request().map_err(AppErrorExt::into_server_fn_error)?;
    let alumni = super::auth::require_role(&[Role::Alumni]).await?;
    let pool = super::auth::pool().await?;
    post::update(pool, id, alumni.id, &body)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

/// Posts awaiting approval. Admin only.
#[server]
pub async fn pending_posts() -> Result<Vec<AlumniPost>, ServerFnError> {
    use crate::repo::post;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    post::list_pending(pool)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn approve_post(id: Uuid) -> Result<AlumniPost, ServerFnError> {
    use crate::repo::post;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    let approved = post::approve(pool, id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    tracing::info!(post_id = %id, "alumni post approved");
    Ok(approved)
}

#[server]
pub async fn delete_post(id: Uuid) -> Result<MessageResponse, ServerFnError> {
    use crate::repo::post;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    let deleted = post::delete(pool, id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    if !deleted {
        return Err(AppError::not_found("Post not found").into_server_fn_error());
    }
    tracing::info!(post_id = %id, "alumni post deleted");
    Ok(MessageResponse {
        message: "Post deleted".to_string(),
    })
}
