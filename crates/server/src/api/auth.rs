// Server-only helpers shared by the api/* modules.

use dioxus::prelude::*;
use shared_types::{AppError, Profile, Role};
use sqlx::{Pool, Postgres};

use crate::auth::{cookies, jwt};
use crate::error_convert::AppErrorExt;
use crate::repo::profile;

/// Process-wide pool, with errors already in server-fn form.
pub(crate) async fn pool() -> Result<&'static Pool<Postgres>, ServerFnError> {
    crate::db::get_db()
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

/// Claims for the current request, if any.
///
/// Prefers what the auth middleware validated (which includes a transparent
/// refresh) and falls back to parsing the access token directly.
pub(crate) fn current_claims() -> Option<jwt::Claims> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Some(claims.clone());
    }
    let token = cookies::extract_access_token(&parts.headers)?;
    jwt::validate_access_token(&token).ok()
}

pub(crate) fn require_auth() -> Result<jwt::Claims, ServerFnError> {
    current_claims()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())
}

/// The caller's stored profile, which must have one of `allowed` roles.
pub(crate) async fn require_role(allowed: &[Role]) -> Result<Profile, ServerFnError> {
    let claims = require_auth()?;
    let pool = pool().await?;
    let found = profile::find_by_id(pool, claims.sub)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?
        .ok_or_else(|| AppError::forbidden("Profile not found").into_server_fn_error())?;

    if !allowed.contains(&found.role) {
        tracing::info!(user_id = %found.id, role = %found.role, "role check rejected caller");
        return Err(AppError::forbidden("You do not have access to this resource").into_server_fn_error());
    }
    Ok(found)
}
