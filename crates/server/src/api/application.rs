use dioxus::prelude::*;
use shared_types::{
    Application, ApplicationStatus, ApplicationSummary, ApplyRequest,
    UpdateApplicationStatusRequest,
};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};
#[cfg(feature = "server")]
use shared_types::Role;

/// Apply to an internship as the signed-in student.
#[server]
pub async fn apply(internship_id: Uuid, body: ApplyRequest) -> Result<Application, ServerFnError> {
    use crate::repo::application;

    body.validate_request().map_err(AppErrorExt::into_server_fn_error)?;
    let student = super::auth::require_role(&[Role::Student]).await?;
    let pool = super::auth::pool().await?;
    let created = application::create(pool, internship_id, student.id, &body)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    tracing::info!(application_id = %created.id, %internship_id, "application submitted");
    Ok(created)
}

/// The caller's application to one internship, if any.
#[server]
pub async fn my_application(internship_id: Uuid) -> Result<Option<Application>, ServerFnError> {
    use crate::repo::application;

    let student = super::auth::require_role(&[Role::Student]).await?;
    let pool = super::auth::pool().await?;
    application::find_for_student(pool, internship_id, student.id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn my_applications() -> Result<Vec<ApplicationSummary>, ServerFnError> {
    use crate::repo::application;

    let student = super::auth::require_role(&[Role::Student]).await?;
    let pool = super::auth::pool().await?;
    application::list_for_student(pool, student.id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

/// All applications, optionally narrowed to one status. Admin only.
#[server]
pub async fn all_applications(
    status: Option<ApplicationStatus>,
) -> Result<Vec<ApplicationSummary>, ServerFnError> {
    use crate::repo::application;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    application::list_all(pool, status)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn update_application_status(
    id: Uuid,
    body: UpdateApplicationStatusRequest,
) -> Result<Application, ServerFnError> {
    use crate::repo::application;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    let updated = application::update_status(pool, id, body.status)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    tracing::info!(application_id = %id, status = updated.status.as_str(), "application status updated");
    Ok(updated)
}
