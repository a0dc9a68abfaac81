use shared_types::{AppError, Profile, Role, UpdateProfileRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

pub(crate) const COLUMNS: &str = "id, email, full_name, role, roll_no, branch, batch, skills, \
     linkedin_url, github_url, is_alumni_verified, created_at, updated_at";

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Profile>, AppError> {
    sqlx::query_as::<_, Profile>(&format!("SELECT {COLUMNS} FROM profiles WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Role of a profile, `None` when the row is missing.
pub async fn find_role(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Role>, AppError> {
    let role: Option<String> = sqlx::query_scalar("SELECT role FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    role.map(|r| Role::parse(&r).map_err(|e| AppError::internal(e.to_string())))
        .transpose()
}

pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    req: &UpdateProfileRequest,
) -> Result<Profile, AppError> {
    sqlx::query_as::<_, Profile>(&format!(
        r#"
        UPDATE profiles
        SET full_name = $2, roll_no = $3, branch = $4, batch = $5, skills = $6,
            linkedin_url = $7, github_url = $8, updated_at = now()
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(req.full_name.trim())
    .bind(req.roll_no.as_deref())
    .bind(req.branch.as_deref())
    .bind(req.batch.as_deref())
    .bind(&req.skills)
    .bind(req.linkedin_url.as_deref())
    .bind(req.github_url.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Profile not found"))
}

pub async fn set_role(pool: &Pool<Postgres>, id: Uuid, role: Role) -> Result<Profile, AppError> {
    sqlx::query_as::<_, Profile>(&format!(
        "UPDATE profiles SET role = $2, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Profile not found"))
}
