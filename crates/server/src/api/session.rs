use dioxus::prelude::*;
use shared_types::{AppConfig, Profile, Session};
use uuid::Uuid;

/// Feature flags and session timings for the client.
#[server]
pub async fn get_app_config() -> Result<AppConfig, ServerFnError> {
    Ok(crate::config::app_config())
}

/// Restore the persisted session from the auth cookies, if any.
#[server]
pub async fn get_session() -> Result<Option<Session>, ServerFnError> {
    Ok(super::auth::current_claims().map(|claims| claims.session()))
}

/// Profile for a signed-in user. Callers may only read their own.
///
/// `Ok(None)` when the row does not exist yet.
#[server]
pub async fn get_profile(user_id: Uuid) -> Result<Option<Profile>, ServerFnError> {
    use crate::error_convert::AppErrorExt;
    use crate::repo::profile;
    use shared_types::AppError;

    let claims = super::auth::require_auth()?;
    if claims.sub != user_id {
        return Err(AppError::forbidden("Cannot read another user's profile").into_server_fn_error());
    }
    let pool = super::auth::pool().await?;
    profile::find_by_id(pool, user_id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}
