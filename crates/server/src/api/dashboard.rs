use dioxus::prelude::*;
use shared_types::{AdminDashboard, AlumniDashboard, StudentDashboard};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;
#[cfg(feature = "server")]
use shared_types::Role;

#[server]
pub async fn student_dashboard() -> Result<StudentDashboard, ServerFnError> {
    use crate::repo::stats;

    let student = super::auth::require_role(&[Role::Student]).await?;
    let pool = super::auth::pool().await?;
    stats::student_dashboard(pool, student.id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn alumni_dashboard() -> Result<AlumniDashboard, ServerFnError> {
    use crate::repo::stats;

    let alumni = super::auth::require_role(&[Role::Alumni]).await?;
    let pool = super::auth::pool().await?;
    stats::alumni_dashboard(pool, alumni.id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn admin_dashboard() -> Result<AdminDashboard, ServerFnError> {
    use crate::repo::stats;

    super::auth::require_role(&[Role::Admin]).await?;
    let pool = super::auth::pool().await?;
    stats::admin_dashboard(pool)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}
