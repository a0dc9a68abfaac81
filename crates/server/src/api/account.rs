use dioxus::prelude::*;
use shared_types::{
    AuthResponse, LoginRequest, MessageResponse, Profile, SignUpRequest, UpdateProfileRequest,
};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

/// Issue tokens for `session`, schedule the cookies, and build the response.
#[cfg(feature = "server")]
async fn start_session(
    pool: &sqlx::Pool<sqlx::Postgres>,
    session: shared_types::Session,
) -> Result<AuthResponse, ServerFnError> {
    use crate::auth::{self, cookies};

    let (access_token, refresh_token) = auth::issue_tokens(pool, session.user_id, &session.email)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    cookies::schedule_auth_cookies(&access_token, &refresh_token);

    Ok(AuthResponse {
        session,
        access_token,
    })
}

#[server]
pub async fn sign_in(body: LoginRequest) -> Result<AuthResponse, ServerFnError> {
    use crate::auth;

    body.validate_request().map_err(AppErrorExt::into_server_fn_error)?;
    let pool = super::auth::pool().await?;

    let session = auth::sign_in(pool, &body.email, &body.password)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    start_session(pool, session).await
}

#[server]
pub async fn sign_up(body: SignUpRequest) -> Result<AuthResponse, ServerFnError> {
    use crate::auth;

    body.validate_request().map_err(AppErrorExt::into_server_fn_error)?;
    let pool = super::auth::pool().await?;

    let created = auth::register(pool, &body)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;
    let session = shared_types::Session {
        user_id: created.id,
        email: created.email,
    };
    start_session(pool, session).await
}

/// Revoke every refresh token for the caller and clear the auth cookies.
///
/// Succeeds without a session so a stale client can always sign out.
#[server]
pub async fn sign_out() -> Result<MessageResponse, ServerFnError> {
    use crate::auth::cookies;
    use crate::repo::account;

    if let Some(claims) = super::auth::current_claims() {
        let pool = super::auth::pool().await?;
        let revoked = account::revoke_all_refresh_tokens(pool, claims.sub)
            .await
            .map_err(AppErrorExt::into_server_fn_error)?;
        tracing::info!(user_id = %claims.sub, revoked, "signed out");
    }
    cookies::schedule_clear_cookies();

    Ok(MessageResponse {
        message: "Signed out".to_string(),
    })
}

#[server]
pub async fn update_profile(body: UpdateProfileRequest) -> Result<Profile, ServerFnError> {
    use crate::repo::profile;

    body.validate_request().map_err(AppErrorExt::into_server_fn_error)?;
    let claims = super::auth::require_auth()?;
    let pool = super::auth::pool().await?;
    profile::update(pool, claims.sub, &body)
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}
