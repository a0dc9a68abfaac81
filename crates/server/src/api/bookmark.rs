use dioxus::prelude::*;
use shared_types::{BookmarkToggle, Internship};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;
#[cfg(feature = "server")]
use shared_types::Role;

#[server]
pub async fn toggle_bookmark(internship_id: Uuid) -> Result<BookmarkToggle, ServerFnError> {
    use crate::repo::bookmark;

    let student = super::auth::require_role(&[Role::Student]).await?;
    let pool = super::auth::pool().await?;
    bookmark::toggle(pool, student.id, internship_id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

/// Ids of the caller's bookmarked internships, for marking list cards.
#[server]
pub async fn bookmarked_ids() -> Result<Vec<Uuid>, ServerFnError> {
    use crate::repo::bookmark;

    let student = super::auth::require_role(&[Role::Student]).await?;
    let pool = super::auth::pool().await?;
    bookmark::list_ids(pool, student.id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

#[server]
pub async fn bookmarked_internships() -> Result<Vec<Internship>, ServerFnError> {
    use crate::repo::bookmark;

    let student = super::auth::require_role(&[Role::Student]).await?;
    let pool = super::auth::pool().await?;
    bookmark::list_internships(pool, student.id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}
