use dioxus::prelude::*;
use shared_types::{CreateInternshipRequest, Internship};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};
#[cfg(feature = "server")]
use shared_types::Role;

/// Open internships whose deadline has not passed, soonest deadline first.
#[server]
pub async fn list_open_internships() -> Result<Vec<Internship>, ServerFnError> {
    use crate::repo::internship;

    super::auth::require_auth()?;
    let pool = super::auth::pool().await?;
    internship::list_open(pool, chrono::Utc::now())
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn get_internship(id: Uuid) -> Result<Internship, ServerFnError> {
    use crate::repo::internship;
    use shared_types::AppError;

    super::auth::require_auth()?;
    let pool = super::auth::pool().await?;
    internship::find_by_id(pool, id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?
        .ok_or_else(|| AppError::not_found("Internship not found").into_server_fn_error())
}

/// Every internship regardless of status. Admin only.
#[server]
pub async fn list_all_internships() -> Result<Vec<Internship>, ServerFnError> {
    use crate::repo::internship;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    internship::list_all(pool)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn create_internship(body: CreateInternshipRequest) -> Result<Internship, ServerFnError> {
    use crate::repo::internship;

    body.validate_request().map_err(AppErrorExt::into_server_fn_error)?;
    let admin = super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    let created = internship::create(pool, admin.id, &body)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    tracing::info!(internship_id = %created.id, status = %created.status, "internship created");
    Ok(created)
}

#[server]
pub async fn close_internship(id: Uuid) -> Result<Internship, ServerFnError> {
    use crate::repo::internship;
    use shared_types::InternshipStatus;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    internship::set_status(pool, id, InternshipStatus::Closed)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}
