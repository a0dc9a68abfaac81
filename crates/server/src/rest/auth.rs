use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, AuthResponse, LoginRequest, MessageResponse, Profile, Session, SignUpRequest,
    UpdateProfileRequest,
};

use crate::auth::{self, cookies, extractors::{AuthRequired, MaybeAuth}};
use crate::error_convert::ValidateRequest;
use crate::repo::{account, profile};

/// Issue a token pair for `session` and put it in Set-Cookie headers as well
/// as the body, so browsers and bearer clients both work.
async fn start_session(
    pool: &Pool<Postgres>,
    session: Session,
) -> Result<(HeaderMap, AuthResponse), AppError> {
    let (access_token, refresh_token) =
        auth::issue_tokens(pool, session.user_id, &session.email).await?;
    let mut headers = HeaderMap::new();
    cookies::set_auth_cookies(&mut headers, &access_token, &refresh_token);
    Ok((
        headers,
        AuthResponse {
            session,
            access_token,
        },
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account and profile created", body = AuthResponse),
        (status = 403, description = "Role cannot be self-selected", body = AppError),
        (status = 409, description = "Email already registered", body = AppError),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload), fields(email = %payload.email, role = %payload.role))]
pub async fn sign_up(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), AppError> {
    payload.validate_request()?;
    let created = auth::register(&pool, &payload).await?;
    let session = Session {
        user_id: created.id,
        email: created.email,
    };
    let (headers, body) = start_session(&pool, session).await?;
    Ok((StatusCode::CREATED, headers, Json(body)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in, with or without a profile row", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload))]
pub async fn login(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), AppError> {
    payload.validate_request()?;
    let session = auth::sign_in(&pool, &payload.email, &payload.password).await?;
    let (headers, body) = start_session(&pool, session).await?;
    Ok((headers, Json(body)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Refresh tokens revoked and cookies cleared", body = MessageResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, caller))]
pub async fn logout(
    State(pool): State<Pool<Postgres>>,
    caller: MaybeAuth,
) -> Result<(HeaderMap, Json<MessageResponse>), AppError> {
    if let Some(claims) = caller.0 {
        account::revoke_all_refresh_tokens(&pool, claims.sub).await?;
    }
    let mut headers = HeaderMap::new();
    cookies::clear_auth_cookies(&mut headers);
    Ok((
        headers,
        Json(MessageResponse {
            message: "Signed out".to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Current session; null when signed out", body = Session)
    ),
    tag = "auth"
)]
pub async fn get_session(caller: MaybeAuth) -> Json<Option<Session>> {
    Json(caller.0.map(|claims| claims.session()))
}

#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "The caller's profile", body = Profile),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 404, description = "Profile row missing", body = AppError)
    ),
    tag = "profiles"
)]
#[tracing::instrument(skip(pool, caller))]
pub async fn get_profile(
    State(pool): State<Pool<Postgres>>,
    caller: AuthRequired,
) -> Result<Json<Profile>, AppError> {
    profile::find_by_id(&pool, caller.0.sub)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Profile not found"))
}

#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 422, description = "Validation error", body = AppError)
    ),
    tag = "profiles"
)]
#[tracing::instrument(skip(pool, caller, payload))]
pub async fn update_profile(
    State(pool): State<Pool<Postgres>>,
    caller: AuthRequired,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    payload.validate_request()?;
    Ok(Json(profile::update(&pool, caller.0.sub, &payload).await?))
}
